//! Configuration loading and required-value resolution.
//!
//! - File parsing into sections in [`loader`]
//! - Strict lookups and derived endpoints in [`store`]
//!
//! # Example
//!
//! ```
//! use artifact_harness::config::ConfigurationStore;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.toml");
//! fs::write(&path, "[artifactory]\nusername = \"admin\"\n").unwrap();
//!
//! let store = ConfigurationStore::load(&path);
//! assert_eq!(store.username().unwrap(), "admin");
//! assert!(store.password().is_err());
//! ```

pub mod loader;
pub mod store;

pub use loader::{load_sections, parse_sections, Sections, SourceFormat, DEFAULT_CONFIG_FILE};
pub use store::{ConfigurationStore, ARTIFACTORY_SECTION, REQUIRED_KEYS};
