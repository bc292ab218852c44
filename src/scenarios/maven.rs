//! Maven deployment.
//!
//! Scaffolds a minimal Maven project from the POM template, writes a
//! settings file carrying repository credentials, runs `mvn clean deploy`
//! and then GETs the deployed POM from the repository.

use super::{Scenario, ScenarioOutcome};
use crate::error::Result;
use crate::fixture::{Scaffold, Session};
use crate::http::ArtifactClient;
use crate::resources::Substitutions;
use crate::shell::{detect_java_home, display_command, execute, CommandOptions, EnvOverrides};
use std::path::PathBuf;

pub const MAVEN_REPO_KEY: &str = "maven-test";
pub const POM_XML_TEMPLATE_PATH: &str = "maven_pom_template.xml";
pub const SETTINGS_XML_TEMPLATE_PATH: &str = "maven_settings_template.xml";
pub const MAVEN_GROUP_ID: &str = "com.example";
pub const MAVEN_ARTIFACT_ID: &str = "example-maven-package";
pub const MAVEN_VERSION: &str = "1.0.1";

/// Name of the rendered settings file inside the scaffold.
pub const SETTINGS_FILE_NAME: &str = "maven_settings.xml";

/// Deployment of a freshly scaffolded Maven project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenDeploy {
    pub repo_key: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Default for MavenDeploy {
    fn default() -> Self {
        Self {
            repo_key: MAVEN_REPO_KEY.to_string(),
            group_id: MAVEN_GROUP_ID.to_string(),
            artifact_id: MAVEN_ARTIFACT_ID.to_string(),
            version: MAVEN_VERSION.to_string(),
        }
    }
}

pub struct MavenFixture {
    client: ArtifactClient,
    project_dir: PathBuf,
    pom_path: PathBuf,
    settings_path: PathBuf,
    env: EnvOverrides,
    artifact_url: String,
}

impl MavenFixture {
    pub fn artifact_url(&self) -> &str {
        &self.artifact_url
    }
}

impl MavenDeploy {
    /// Substitutions for the POM template.
    pub fn pom_substitutions(&self, artifactory_url: &str) -> Substitutions {
        Substitutions::new()
            .with("repo_url", format!("{}/{}", artifactory_url, self.repo_key))
            .with("group_id", self.group_id.as_str())
            .with("artifact_id", self.artifact_id.as_str())
            .with("version", self.version.as_str())
    }

    /// URL of the deployed POM.
    ///
    /// `{base}/{repo}/{group as path}/{artifact}/{version}/{artifact}-{version}.pom`
    pub fn artifact_url(&self, artifactory_url: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}-{}.pom",
            artifactory_url,
            self.repo_key,
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        )
    }
}

impl Scenario for MavenDeploy {
    type Fixture = MavenFixture;

    fn name(&self) -> &'static str {
        "maven"
    }

    fn setup(&self, session: &Session, scaffold: &mut Scaffold) -> Result<MavenFixture> {
        let config = session.config();
        let artifactory_url = config.artifactory_url()?;
        let username = config.username()?;
        let password = config.password()?;
        let client = session.basic_client()?;

        let pom = session
            .resource(POM_XML_TEMPLATE_PATH, &self.pom_substitutions(&artifactory_url))?
            .to_file_contents()?;
        let settings = session
            .resource(
                SETTINGS_XML_TEMPLATE_PATH,
                &Substitutions::new()
                    .with("artifactory_username", username)
                    .with("artifactory_password", password),
            )?
            .to_file_contents()?;

        let project_dir = scaffold.create_dir(&self.artifact_id)?;
        scaffold.create_dir(format!("{}/src/main/java", self.artifact_id))?;
        scaffold.create_dir(format!("{}/src/main/resources", self.artifact_id))?;
        let pom_path = scaffold.write_file(format!("{}/pom.xml", self.artifact_id), pom)?;
        let settings_path = scaffold.write_file(SETTINGS_FILE_NAME, settings)?;

        let env = match detect_java_home(session.options().java_home.as_deref()) {
            Some(java_home) => {
                tracing::debug!("Using JAVA_HOME={}", java_home.display());
                EnvOverrides::new().with("JAVA_HOME", java_home.to_string_lossy())
            }
            None => {
                tracing::warn!("No Java home found; Maven will use its own JDK discovery");
                EnvOverrides::new()
            }
        };

        Ok(MavenFixture {
            client,
            project_dir,
            pom_path,
            settings_path,
            env,
            artifact_url: self.artifact_url(&artifactory_url),
        })
    }

    fn execute(&self, session: &Session, fixture: &MavenFixture) -> Result<ScenarioOutcome> {
        let program = session.options().tools.mvn.as_str();
        let args = vec![
            "clean".to_string(),
            "deploy".to_string(),
            format!("--settings={}", fixture.settings_path.display()),
            "-f".to_string(),
            fixture.pom_path.display().to_string(),
        ];
        let options = CommandOptions {
            cwd: Some(fixture.project_dir.clone()),
            env: fixture.env.clone(),
            timeout: session.options().tool_timeout,
        };

        let result = execute(program, &args, &options)?;
        tracing::debug!("Maven deploy output:\n{}", result.combined_output());
        result.check(&display_command(program, &args))?;

        let response = fixture
            .client
            .get(&fixture.artifact_url)?
            .expect_status(200)?;

        Ok(ScenarioOutcome {
            verified_url: response.url,
            status: response.status,
        })
    }
}
