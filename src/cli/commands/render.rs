//! `render` command: print a template with placeholders filled in.

use std::io::Write;

use super::dispatcher::{Command, CommandResult, GlobalPaths};
use crate::cli::args::RenderArgs;
use crate::error::Result;
use crate::resources::{Rendered, Substitutions, TemplateRenderer};

pub struct RenderCommand {
    paths: GlobalPaths,
    args: RenderArgs,
}

impl RenderCommand {
    pub fn new(paths: GlobalPaths, args: RenderArgs) -> Self {
        Self { paths, args }
    }
}

impl Command for RenderCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let renderer = TemplateRenderer::new(&self.paths.resources);
        let subs: Substitutions = self.args.set.iter().cloned().collect();

        let content = renderer.render(&self.args.template, &subs)?;
        let rendered = Rendered::from_template(&self.args.template, content)?;
        write!(out, "{}", rendered.to_file_contents()?)?;

        Ok(CommandResult::success())
    }
}
