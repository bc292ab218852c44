//! NPM publish.
//!
//! Writes `package.json`, `index.js` and an `.npmrc` with the registry
//! token, runs `npm publish` against the repository's npm API and then GETs
//! the package metadata.

use super::{Scenario, ScenarioOutcome};
use crate::error::Result;
use crate::fixture::{Scaffold, Session};
use crate::http::ArtifactClient;
use crate::resources::Substitutions;
use crate::shell::{display_command, execute, CommandOptions};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

pub const NPM_REPO_KEY: &str = "npm-test";
pub const NPM_PACKAGE_TEMPLATE_PATH: &str = "npm_package_template.json";
pub const NPMRC_TEMPLATE_PATH: &str = "npmrc_template";
pub const NPM_PACKAGE_NAME: &str = "example-npm-package";
pub const NPM_PACKAGE_VERSION: &str = "1.0.1";

const INDEX_JS: &str = "console.log(\"Hello, npm!\");";

/// Leading `http://` or `https://`.
static PROTOCOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("PROTOCOL_REGEX must compile"));

/// Publication of a minimal npm package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmPublish {
    pub repo_key: String,
    pub package_name: String,
    pub package_version: String,
}

impl Default for NpmPublish {
    fn default() -> Self {
        Self {
            repo_key: NPM_REPO_KEY.to_string(),
            package_name: NPM_PACKAGE_NAME.to_string(),
            package_version: NPM_PACKAGE_VERSION.to_string(),
        }
    }
}

pub struct NpmFixture {
    client: ArtifactClient,
    package_dir: PathBuf,
    registry_url: String,
    package_url: String,
}

impl NpmFixture {
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }
}

impl NpmPublish {
    /// npm registry endpoint: `{base}/api/npm/{repo}/`.
    pub fn registry_url(&self, artifactory_url: &str) -> String {
        format!("{}/api/npm/{}/", artifactory_url, self.repo_key)
    }

    /// Package metadata endpoint checked after publishing.
    pub fn package_url(&self, artifactory_url: &str) -> String {
        format!("{}{}/", self.registry_url(artifactory_url), self.package_name)
    }

    pub fn package_substitutions(&self) -> Substitutions {
        Substitutions::new()
            .with("package_name", self.package_name.as_str())
            .with("package_version", self.package_version.as_str())
    }
}

/// Registry URL without its scheme, as npm keys per-registry auth in
/// `.npmrc` (`//host/path/:_authToken=...`).
pub fn strip_protocol(url: &str) -> String {
    PROTOCOL_REGEX.replace(url, "").into_owned()
}

impl Scenario for NpmPublish {
    type Fixture = NpmFixture;

    fn name(&self) -> &'static str {
        "npm"
    }

    fn setup(&self, session: &Session, scaffold: &mut Scaffold) -> Result<NpmFixture> {
        let config = session.config();
        let artifactory_url = config.artifactory_url()?;
        let token = config.token()?;
        let client = session.basic_client()?;

        let registry_url = self.registry_url(&artifactory_url);
        let registry_path = strip_protocol(&registry_url);

        let package_json = session
            .resource(NPM_PACKAGE_TEMPLATE_PATH, &self.package_substitutions())?
            .to_file_contents()?;
        let npmrc = session
            .resource(
                NPMRC_TEMPLATE_PATH,
                &Substitutions::new()
                    .with("registry_url", registry_url.as_str())
                    .with("registry_path", registry_path)
                    .with("auth_token", token),
            )?
            .to_file_contents()?;

        scaffold.write_file("package.json", package_json)?;
        scaffold.write_file("index.js", INDEX_JS)?;
        scaffold.write_file(".npmrc", npmrc)?;

        Ok(NpmFixture {
            client,
            package_dir: scaffold.root().to_path_buf(),
            package_url: self.package_url(&artifactory_url),
            registry_url,
        })
    }

    fn execute(&self, session: &Session, fixture: &NpmFixture) -> Result<ScenarioOutcome> {
        let program = session.options().tools.npm.as_str();
        let args = vec![
            "publish".to_string(),
            "--registry".to_string(),
            fixture.registry_url.clone(),
        ];
        let options = CommandOptions {
            cwd: Some(fixture.package_dir.clone()),
            timeout: session.options().tool_timeout,
            ..Default::default()
        };

        let result = execute(program, &args, &options)?;
        tracing::debug!("NPM publish output:\n{}", result.combined_output());
        result.check(&display_command(program, &args))?;

        let response = fixture
            .client
            .get(&fixture.package_url)?
            .expect_status(200)?;

        Ok(ScenarioOutcome {
            verified_url: response.url,
            status: response.status,
        })
    }
}
