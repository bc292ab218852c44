//! Required-value resolution over a loaded configuration.

use crate::config::loader::{load_sections, Sections};
use crate::error::{HarnessError, Result};
use std::path::Path;

/// Section holding the repository endpoint and credentials.
pub const ARTIFACTORY_SECTION: &str = "artifactory";

/// Keys every scenario needs from [`ARTIFACTORY_SECTION`].
pub const REQUIRED_KEYS: [&str; 4] = ["server_url", "username", "password", "token"];

/// Immutable configuration, loaded once per session.
///
/// Every lookup is strict: an absent or empty value is an error, never a
/// default.
///
/// # Example
///
/// ```
/// use artifact_harness::config::ConfigurationStore;
///
/// let store = ConfigurationStore::from_toml_str(
///     "[artifactory]\nserver_url = \"https://repo.example.com\"\n",
/// ).unwrap();
/// assert_eq!(
///     store.artifactory_url().unwrap(),
///     "https://repo.example.com/artifactory"
/// );
/// assert!(store.token().is_err());
/// ```
#[derive(Clone, Default)]
pub struct ConfigurationStore {
    sections: Sections,
}

// Values hold credentials; only section and key names are shown.
impl std::fmt::Debug for ConfigurationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.sections
                    .iter()
                    .map(|(name, entries)| (name, entries.keys().collect::<Vec<_>>())),
            )
            .finish()
    }
}

impl ConfigurationStore {
    /// Create a store from already-parsed sections.
    pub fn new(sections: Sections) -> Self {
        Self { sections }
    }

    /// Load a configuration file, best-effort.
    ///
    /// A missing or malformed file produces an empty store; every lookup
    /// then fails with `MissingConfigurationValue` at first access.
    pub fn load(path: &Path) -> Self {
        match load_sections(path) {
            Ok(sections) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                Self::new(sections)
            }
            Err(e) => {
                tracing::warn!("Configuration unavailable, lookups will fail: {}", e);
                Self::default()
            }
        }
    }

    /// Load a configuration file, surfacing load errors immediately.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` or `ConfigParseError`.
    pub fn load_strict(path: &Path) -> Result<Self> {
        load_sections(path).map(Self::new)
    }

    /// Parse TOML content directly.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        crate::config::loader::parse_sections(
            content,
            crate::config::loader::SourceFormat::Toml,
            Path::new("<inline>"),
        )
        .map(Self::new)
    }

    /// Resolve a required value.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfigurationValue` naming the key when the section
    /// or key is absent, or the value is empty.
    pub fn resolve(&self, section: &str, key: &str) -> Result<String> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| HarnessError::MissingConfigurationValue {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Repository server URL.
    pub fn server_url(&self) -> Result<String> {
        self.resolve(ARTIFACTORY_SECTION, "server_url")
    }

    /// Artifactory API base: `{server_url}/artifactory`.
    pub fn artifactory_url(&self) -> Result<String> {
        let server_url = self.server_url()?;
        Ok(format!("{}/artifactory", server_url.trim_end_matches('/')))
    }

    pub fn username(&self) -> Result<String> {
        self.resolve(ARTIFACTORY_SECTION, "username")
    }

    pub fn password(&self) -> Result<String> {
        self.resolve(ARTIFACTORY_SECTION, "password")
    }

    pub fn token(&self) -> Result<String> {
        self.resolve(ARTIFACTORY_SECTION, "token")
    }

    /// Resolve every required key, stopping at the first missing one.
    pub fn check_required(&self) -> Result<()> {
        for key in REQUIRED_KEYS {
            self.resolve(ARTIFACTORY_SECTION, key)?;
        }
        Ok(())
    }
}
