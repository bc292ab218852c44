//! Platform-specific tool discovery.

use crate::shell::command::{execute, CommandOptions};
use std::path::PathBuf;
use std::time::Duration;

/// macOS helper that prints the active JDK home.
const MACOS_JAVA_HOME_HELPER: &str = "/usr/libexec/java_home";

/// Locate a Java installation for Maven.
///
/// Resolution order:
/// 1. The explicit override, when non-empty
/// 2. The `JAVA_HOME` environment variable, when non-empty
/// 3. `/usr/libexec/java_home` on macOS
///
/// Returns `None` when nothing is found; callers then leave `JAVA_HOME`
/// unset and let Maven's own discovery apply.
pub fn detect_java_home(explicit: Option<&str>) -> Option<PathBuf> {
    java_home_from(explicit, std::env::var("JAVA_HOME").ok().as_deref())
        .or_else(platform_java_home)
}

/// Pick a Java home from an override and an environment value.
pub fn java_home_from(explicit: Option<&str>, env_value: Option<&str>) -> Option<PathBuf> {
    explicit
        .filter(|v| !v.trim().is_empty())
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .map(|v| PathBuf::from(v.trim()))
}

fn platform_java_home() -> Option<PathBuf> {
    if !cfg!(target_os = "macos") {
        return None;
    }

    let options = CommandOptions {
        timeout: Some(Duration::from_secs(10)),
        ..Default::default()
    };

    match execute(MACOS_JAVA_HOME_HELPER, &[], &options) {
        Ok(result) if result.success && !result.stdout.trim().is_empty() => {
            Some(PathBuf::from(result.stdout.trim()))
        }
        Ok(result) => {
            tracing::warn!(
                "Error retrieving JAVA_HOME: {}",
                result.combined_output().trim()
            );
            None
        }
        Err(e) => {
            tracing::warn!("Error retrieving JAVA_HOME: {}", e);
            None
        }
    }
}
