//! `run` command: execute scenarios and report pass/fail.

use std::io::Write;
use std::time::Duration;

use super::dispatcher::{Command, CommandResult, GlobalPaths};
use crate::cli::args::RunArgs;
use crate::config::ConfigurationStore;
use crate::error::Result;
use crate::fixture::{HarnessOptions, Session, ToolPaths};
use crate::resources::TemplateRenderer;
use crate::scenarios::ScenarioReport;

pub struct RunCommand {
    paths: GlobalPaths,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(paths: GlobalPaths, args: RunArgs) -> Self {
        Self { paths, args }
    }

    fn options(&self) -> HarnessOptions {
        HarnessOptions {
            work_dir: self.paths.work_dir.clone(),
            http_timeout: Duration::from_secs(self.args.http_timeout),
            tool_timeout: match self.args.tool_timeout {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            tools: ToolPaths {
                mvn: self.args.mvn.clone(),
                npm: self.args.npm.clone(),
            },
            java_home: self.args.java_home.clone(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let session = Session::new(
            ConfigurationStore::load(&self.paths.config),
            TemplateRenderer::new(&self.paths.resources),
            self.options(),
        );

        let reports = self.args.scenario.run(&session);
        for report in &reports {
            writeln!(out, "{}", format_report(report))?;
        }

        let failed = reports.iter().filter(|r| !r.passed()).count();
        writeln!(
            out,
            "{} passed, {} failed",
            reports.len() - failed,
            failed
        )?;

        if failed == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

/// One report line: `PASS name ...` or `FAIL name: error`.
pub fn format_report(report: &ScenarioReport) -> String {
    match &report.result {
        Ok(outcome) => format!(
            "PASS {} ({:.1}s): HTTP {} {}",
            report.name,
            report.duration.as_secs_f64(),
            outcome.status,
            outcome.verified_url
        ),
        Err(e) => format!(
            "FAIL {} ({:.1}s): {}",
            report.name,
            report.duration.as_secs_f64(),
            e
        ),
    }
}
