//! artifact-harness - functional checks for an artifact repository.
//!
//! Exercises a repository manager through its HTTP API and through the
//! Maven and npm command-line tools: generic upload, Maven deploy and npm
//! publish. Scenario inputs (POMs, settings files, package manifests,
//! `.npmrc`) are rendered from `{{placeholder}}` templates filled with
//! values from a configuration file.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and required-value resolution
//! - [`error`] - Error types and result aliases
//! - [`fixture`] - Session state and scenario-scoped scaffolding
//! - [`http`] - Authenticated repository client
//! - [`resources`] - Template loading and placeholder substitution
//! - [`scenarios`] - Generic upload, Maven deploy and npm publish checks
//! - [`shell`] - External command execution
//!
//! # Example
//!
//! ```
//! use artifact_harness::resources::{render_str, Substitutions};
//!
//! let subs = Substitutions::new()
//!     .with("group_id", "com.example")
//!     .with("version", "1.0.1");
//! let pom = render_str("<groupId>{{group_id}}</groupId><version>{{version}}</version>", &subs);
//! assert_eq!(pom, "<groupId>com.example</groupId><version>1.0.1</version>");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod resources;
pub mod scenarios;
pub mod shell;

pub use error::{HarnessError, Result};
