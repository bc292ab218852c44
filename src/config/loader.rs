//! Configuration file loading.
//!
//! A configuration source is a file of named sections, each holding scalar
//! key/value pairs. TOML is the default format; YAML is accepted for files
//! ending in `.yml` or `.yaml`.
//!
//! ```toml
//! [artifactory]
//! server_url = "https://artifactory.example.com"
//! username = "admin"
//! password = "secret"
//! token = "..."
//! ```

use crate::error::{HarnessError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Parsed configuration: section name -> key -> value.
pub type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Yaml,
}

impl SourceFormat {
    /// Pick a format from the file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => SourceFormat::Yaml,
            _ => SourceFormat::Toml,
        }
    }
}

/// Load and parse a configuration file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the content is not a table of sections.
pub fn load_sections(path: &Path) -> Result<Sections> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HarnessError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HarnessError::Io(e)
        }
    })?;

    parse_sections(&content, SourceFormat::from_path(path), path)
}

/// Parse configuration content into sections.
///
/// Non-string scalars (numbers, booleans) are stringified. Top-level
/// scalars and nested collections are skipped.
///
/// # Arguments
///
/// * `content` - The file content to parse
/// * `format` - Format of the content
/// * `source_path` - Path for error reporting
pub fn parse_sections(content: &str, format: SourceFormat, source_path: &Path) -> Result<Sections> {
    let parse_error = |message: String| HarnessError::ConfigParseError {
        path: source_path.to_path_buf(),
        message,
    };

    match format {
        SourceFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Ok(sections_from_toml(table))
        }
        SourceFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            match value {
                serde_yaml::Value::Mapping(map) => Ok(sections_from_yaml(map)),
                // An empty document parses as null
                serde_yaml::Value::Null => Ok(Sections::new()),
                _ => Err(parse_error("expected a mapping of sections".to_string())),
            }
        }
    }
}

fn sections_from_toml(table: toml::Table) -> Sections {
    let mut sections = Sections::new();

    for (name, value) in table {
        let toml::Value::Table(entries) = value else {
            tracing::debug!("Ignoring top-level config key outside a section: {}", name);
            continue;
        };

        let section = sections.entry(name).or_default();
        for (key, value) in entries {
            let scalar = match value {
                toml::Value::String(s) => Some(s),
                toml::Value::Integer(i) => Some(i.to_string()),
                toml::Value::Float(f) => Some(f.to_string()),
                toml::Value::Boolean(b) => Some(b.to_string()),
                toml::Value::Datetime(d) => Some(d.to_string()),
                toml::Value::Array(_) | toml::Value::Table(_) => None,
            };
            if let Some(scalar) = scalar {
                section.insert(key, scalar);
            }
        }
    }

    sections
}

fn sections_from_yaml(map: serde_yaml::Mapping) -> Sections {
    let mut sections = Sections::new();

    for (name, value) in map {
        let (Some(name), serde_yaml::Value::Mapping(entries)) = (yaml_scalar(&name), value) else {
            continue;
        };

        let section = sections.entry(name).or_default();
        for (key, value) in entries {
            // `key:` with no value parses as null, which is kept as empty
            let scalar = match &value {
                serde_yaml::Value::Null => Some(String::new()),
                other => yaml_scalar(other),
            };
            if let (Some(key), Some(scalar)) = (yaml_scalar(&key), scalar) {
                section.insert(key, scalar);
            }
        }
    }

    sections
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
