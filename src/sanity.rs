//! Post-install sanity checks.

use crate::executor::ExecuteError;
use std::path::Path;

/// Paths, relative to the install root, that must exist after installation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationLayout {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

impl InstallationLayout {
    pub fn new(files: Vec<String>, dirs: Vec<String>) -> Self {
        Self { files, dirs }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Check every entry under `root`, reporting all missing paths at once.
    ///
    /// A file entry must be a regular file (or a link to one) and a dir entry
    /// must be a directory.
    pub fn check(&self, root: &Path) -> Result<(), ExecuteError> {
        let mut missing = Vec::new();

        for file in &self.files {
            let path = root.join(file);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "found file");
            } else {
                missing.push(file.clone());
            }
        }

        for dir in &self.dirs {
            let path = root.join(dir);
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "found directory");
            } else {
                missing.push(format!("{}/", dir.trim_end_matches('/')));
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ExecuteError::SanityCheck {
                root: root.to_path_buf(),
                missing,
            })
        }
    }
}
