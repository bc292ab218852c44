//! Error types for harness operations.
//!
//! This module defines [`HarnessError`], the error type shared by the
//! configuration store, the template renderer and the scenarios, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every error is terminal for the scenario that raised it
//! - Scenario teardown runs regardless of which error occurred
//! - Failures against the live repository carry the raw response body or
//!   subprocess output so they can be diagnosed from the report alone

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required configuration value is absent or empty.
    #[error(
        "The required key '{key}' is empty in section [{section}] of the configuration. \
         This is a required field for the test."
    )]
    MissingConfigurationValue { section: String, key: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A template could not be read from the resource root.
    #[error("Resource not found: {path}: {message}")]
    ResourceNotFound { path: PathBuf, message: String },

    /// A rendered template could not be parsed into a structured value.
    #[error("Rendered template {path} is not valid structured data: {message}")]
    TemplateParseError { path: PathBuf, message: String },

    /// External build tool exited non-zero (or could not be run at all).
    #[error("Command failed with exit code {code:?}: {command}\n{output}")]
    ExternalToolFailure {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The repository answered a request with an unexpected status.
    #[error("Verification failed for {url}: expected HTTP {expected}, got {status}: {body}")]
    VerificationFailure {
        url: String,
        expected: u16,
        status: u16,
        body: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Building an archive payload failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
