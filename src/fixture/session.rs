//! Session-wide fixture state.

use crate::config::ConfigurationStore;
use crate::error::Result;
use crate::http::{ArtifactClient, Auth, DEFAULT_HTTP_TIMEOUT};
use crate::resources::{Rendered, Substitutions, TemplateRenderer};
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for build-tool subprocesses.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(600);

/// Executables the build-tool scenarios invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub mvn: String,
    pub npm: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            mvn: "mvn".to_string(),
            npm: "npm".to_string(),
        }
    }
}

/// Knobs shared by every scenario in a session.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// Directory under which each scenario gets its own scaffold.
    pub work_dir: PathBuf,

    /// Timeout for each HTTP request.
    pub http_timeout: Duration,

    /// Timeout for each build-tool run (None = wait forever).
    pub tool_timeout: Option<Duration>,

    /// Build-tool executables.
    pub tools: ToolPaths,

    /// Explicit Java home for Maven; detected when unset.
    pub java_home: Option<String>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            tool_timeout: Some(DEFAULT_TOOL_TIMEOUT),
            tools: ToolPaths::default(),
            java_home: None,
        }
    }
}

/// Configuration, templates and options, built once and shared by
/// reference with every scenario.
#[derive(Debug, Clone)]
pub struct Session {
    config: ConfigurationStore,
    renderer: TemplateRenderer,
    options: HarnessOptions,
}

impl Session {
    pub fn new(
        config: ConfigurationStore,
        renderer: TemplateRenderer,
        options: HarnessOptions,
    ) -> Self {
        Self {
            config,
            renderer,
            options,
        }
    }

    pub fn config(&self) -> &ConfigurationStore {
        &self.config
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Render a template and interpret it by extension.
    ///
    /// `.json` templates come back parsed; everything else as text.
    pub fn resource(&self, template_path: &str, subs: &Substitutions) -> Result<Rendered> {
        let content = self.renderer.render(template_path, subs)?;
        Rendered::from_template(template_path, content)
    }

    /// HTTP client authenticated with the configured username/password.
    pub fn basic_client(&self) -> Result<ArtifactClient> {
        let auth = Auth::Basic {
            username: self.config.username()?,
            password: self.config.password()?,
        };
        ArtifactClient::with_timeout(auth, self.options.http_timeout)
    }

    /// HTTP client authenticated with the configured access token.
    pub fn token_client(&self) -> Result<ArtifactClient> {
        ArtifactClient::with_timeout(Auth::Bearer(self.config.token()?), self.options.http_timeout)
    }
}
