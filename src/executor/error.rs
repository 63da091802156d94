//! Executor error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during recipe execution.
#[derive(Error, Debug)]
pub enum ExecuteError {
    /// An external command failed in a step that treats failure as fatal.
    #[error("command failed: {cmd} (exit code: {code:?})\nstderr: {stderr}")]
    BuildStep {
        cmd: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Expected install paths are absent. `missing` lists all of them.
    #[error("sanity check failed in {}: missing {}", .root.display(), .missing.join(", "))]
    SanityCheck { root: PathBuf, missing: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("missing required option: {0}")]
    MissingOption(String),

    #[error("no easyblock named '{0}'")]
    UnknownEasyblock(String),
}
