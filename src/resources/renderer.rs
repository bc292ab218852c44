//! File-backed template rendering.

use crate::error::{HarnessError, Result};
use crate::resources::substitution::{placeholders, render_str, Substitutions};
use std::fs;
use std::path::{Path, PathBuf};

/// Default resource root, relative to the working directory.
pub const DEFAULT_RESOURCE_ROOT: &str = "resources";

/// Loads templates from a resource root and fills in placeholders.
///
/// Stateless: every call re-reads the template, nothing is cached.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    root: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer over the given resource root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a template under the resource root.
    pub fn resource_path(&self, template_path: &str) -> PathBuf {
        self.root.join(template_path)
    }

    /// Read a template without substitution.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the file is missing or not UTF-8 text.
    pub fn load(&self, template_path: &str) -> Result<String> {
        let path = self.resource_path(template_path);
        fs::read_to_string(&path).map_err(|e| HarnessError::ResourceNotFound {
            path,
            message: e.to_string(),
        })
    }

    /// Render a template with the given substitutions.
    ///
    /// Placeholders left unfilled are logged at debug level and passed
    /// through; consumers of the rendered file surface them.
    pub fn render(&self, template_path: &str, subs: &Substitutions) -> Result<String> {
        let content = self.load(template_path)?;
        let rendered = render_str(&content, subs);

        let unfilled: Vec<String> = placeholders(&rendered)
            .into_iter()
            .filter(|name| subs.get(name).is_none())
            .collect();
        if !unfilled.is_empty() {
            tracing::debug!(
                "Template {} rendered with unfilled placeholders: {}",
                template_path,
                unfilled.join(", ")
            );
        }

        Ok(rendered)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_ROOT)
    }
}
