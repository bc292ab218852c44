//! `check-config` command: report which required values are set.

use std::io::Write;

use super::dispatcher::{Command, CommandResult, GlobalPaths};
use crate::config::{ConfigurationStore, ARTIFACTORY_SECTION, REQUIRED_KEYS};
use crate::error::Result;

/// Keys whose values are safe to print.
const PUBLIC_KEYS: [&str; 2] = ["server_url", "username"];

pub struct CheckConfigCommand {
    paths: GlobalPaths,
}

impl CheckConfigCommand {
    pub fn new(paths: GlobalPaths) -> Self {
        Self { paths }
    }
}

impl Command for CheckConfigCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let store = ConfigurationStore::load(&self.paths.config);
        writeln!(out, "{}", self.paths.config.display())?;

        let mut missing = 0;
        for key in REQUIRED_KEYS {
            match store.resolve(ARTIFACTORY_SECTION, key) {
                Ok(value) if PUBLIC_KEYS.contains(&key) => {
                    writeln!(out, "  {}.{} = {}", ARTIFACTORY_SECTION, key, value)?
                }
                Ok(_) => writeln!(out, "  {}.{} = ***", ARTIFACTORY_SECTION, key)?,
                Err(e) => {
                    missing += 1;
                    writeln!(out, "  {}.{} MISSING: {}", ARTIFACTORY_SECTION, key, e)?;
                }
            }
        }

        if missing == 0 {
            if let Ok(url) = store.artifactory_url() {
                writeln!(out, "API base: {}", url)?;
            }
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
