//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing its report to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Paths shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalPaths {
    pub config: PathBuf,
    pub resources: PathBuf,
    pub work_dir: PathBuf,
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: GlobalPaths,
}

impl CommandDispatcher {
    pub fn new(paths: GlobalPaths) -> Self {
        Self { paths }
    }

    /// Build a dispatcher from parsed global flags.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(GlobalPaths {
            config: cli.config.clone(),
            resources: cli.resources.clone(),
            work_dir: cli.work_dir.clone(),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.paths.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(self.paths.clone(), args.clone());
                cmd.execute(out)
            }
            Commands::Render(args) => {
                let cmd = super::render::RenderCommand::new(self.paths.clone(), args.clone());
                cmd.execute(out)
            }
            Commands::CheckConfig => {
                let cmd = super::check_config::CheckConfigCommand::new(self.paths.clone());
                cmd.execute(out)
            }
        }
    }
}
