//! Caller-side interpretation of rendered templates.
//!
//! The renderer always produces text. Callers that need structured data
//! (package manifests) parse the text here, keyed off the template's file
//! extension.

use crate::error::{HarnessError, Result};
use std::path::Path;

/// A rendered template, optionally parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Plain text (XML, rc files, anything not `.json`).
    Text(String),
    /// Parsed JSON document.
    Json(serde_json::Value),
}

impl Rendered {
    /// Interpret rendered content according to the template path.
    ///
    /// `.json` templates are quote-normalized and parsed; everything else is
    /// kept as text.
    pub fn from_template(template_path: &str, content: String) -> Result<Self> {
        if template_path.ends_with(".json") {
            parse_json(Path::new(template_path), &content).map(Rendered::Json)
        } else {
            Ok(Rendered::Text(content))
        }
    }

    /// Text to write to disk. JSON is pretty-printed.
    pub fn to_file_contents(&self) -> Result<String> {
        match self {
            Rendered::Text(text) => Ok(text.clone()),
            Rendered::Json(value) => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| HarnessError::Other(e.into())),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Rendered::Json(value) => Some(value),
            Rendered::Text(_) => None,
        }
    }
}

/// Replace single quotes with double quotes.
///
/// Lets JSON templates be written with single-quoted strings. Apostrophes
/// inside values are rewritten too.
pub fn normalize_quotes(content: &str) -> String {
    content.replace('\'', "\"")
}

/// Parse rendered JSON after quote normalization.
///
/// # Errors
///
/// Returns `TemplateParseError` naming the template path.
pub fn parse_json(template_path: &Path, content: &str) -> Result<serde_json::Value> {
    serde_json::from_str(&normalize_quotes(content)).map_err(|e| HarnessError::TemplateParseError {
        path: template_path.to_path_buf(),
        message: e.to_string(),
    })
}
