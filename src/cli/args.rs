//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::resources::DEFAULT_RESOURCE_ROOT;
use crate::scenarios::ScenarioKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Integration checks for an artifact repository: generic upload, Maven
/// deploy and npm publish.
#[derive(Debug, Parser)]
#[command(name = "artifact-harness")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the resource templates
    #[arg(short, long, global = true, default_value = DEFAULT_RESOURCE_ROOT)]
    pub resources: PathBuf,

    /// Directory under which scenario files are created
    #[arg(short, long, global = true, default_value = ".")]
    pub work_dir: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run scenarios against the configured repository
    Run(RunArgs),

    /// Print a rendered template
    Render(RenderArgs),

    /// Check that every required configuration value is set
    CheckConfig,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Scenario to run
    #[arg(value_enum, default_value = "all")]
    pub scenario: ScenarioKind,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub http_timeout: u64,

    /// Build-tool timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 600)]
    pub tool_timeout: u64,

    /// Java home for Maven (detected when omitted)
    #[arg(long)]
    pub java_home: Option<String>,

    /// Maven executable
    #[arg(long, default_value = "mvn")]
    pub mvn: String,

    /// npm executable
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Template path relative to the resource directory
    pub template: String,

    /// Placeholder value as name=value (repeatable)
    #[arg(short, long = "set", value_parser = parse_substitution)]
    pub set: Vec<(String, String)>,
}

/// Parse a `name=value` pair. The value may itself contain `=`.
pub fn parse_substitution(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}
