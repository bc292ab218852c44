//! Scenario-scoped files with guaranteed cleanup.

use crate::error::{HarnessError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Tracks every file and directory a scenario creates and removes them
/// when dropped.
///
/// Drop runs on success, on error return and during panic unwinding, so
/// teardown cannot be skipped. Paths are removed in reverse creation order.
///
/// # Example
///
/// ```
/// use artifact_harness::fixture::Scaffold;
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// let root = temp.path().join("npm");
/// {
///     let mut scaffold = Scaffold::create(&root).unwrap();
///     scaffold.write_file("package.json", "{}").unwrap();
///     assert!(root.join("package.json").exists());
/// }
/// assert!(!root.exists());
/// ```
#[derive(Debug)]
pub struct Scaffold {
    root: PathBuf,
    created: Vec<PathBuf>,
}

impl Scaffold {
    /// Open a scaffold rooted at `root`, creating the directory if needed.
    ///
    /// A relative root is resolved against the current directory, so every
    /// path handed out stays valid for child processes with another cwd.
    /// A root created here is removed on teardown; a pre-existing root is
    /// left in place and only its new contents are removed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = std::path::absolute(root.into())?;
        let mut created = Vec::new();

        if !root.exists() {
            fs::create_dir_all(&root)?;
            created.push(root.clone());
        }

        tracing::debug!("Scaffold opened at {}", root.display());
        Ok(Self { root, created })
    }

    /// Get the scaffold root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a scaffold-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Paths that teardown will remove, in creation order.
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }

    /// Create a directory (and missing parents) under the root.
    pub fn create_dir(&mut self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let relative = checked_relative(relative.as_ref())?;
        let path = self.root.join(relative);

        if let Some(first_missing) = self.first_missing(relative) {
            fs::create_dir_all(&path)?;
            self.track(first_missing);
        }

        Ok(path)
    }

    /// Write a file under the root, creating parent directories.
    pub fn write_file(
        &mut self,
        relative: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<PathBuf> {
        let relative = checked_relative(relative.as_ref())?;

        if let Some(parent) = relative.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_dir(parent)?;
        }

        let path = self.root.join(relative);
        let existed = path.exists();
        fs::write(&path, contents)?;
        if !existed {
            self.track(path.clone());
        }

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Remove everything created so far.
    pub fn teardown(mut self) {
        self.cleanup();
    }

    /// Record a new path unless an already-tracked directory covers it.
    fn track(&mut self, path: PathBuf) {
        if !self.created.iter().any(|tracked| path.starts_with(tracked)) {
            self.created.push(path);
        }
    }

    fn first_missing(&self, relative: &Path) -> Option<PathBuf> {
        let mut current = self.root.clone();
        for component in relative.components() {
            current.push(component);
            if !current.exists() {
                return Some(current);
            }
        }
        None
    }

    fn cleanup(&mut self) {
        for path in self.created.drain(..).rev() {
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };

            match removed {
                Ok(()) => tracing::debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for Scaffold {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn checked_relative(path: &Path) -> Result<&Path> {
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        Ok(path)
    } else {
        Err(HarnessError::Other(anyhow::anyhow!(
            "scaffold paths must stay under the root: {}",
            path.display()
        )))
    }
}
