//! Process invocation.
//!
//! Commands go through a [`CommandRunner`] so the lifecycle can be driven
//! against something other than a real shell.

use std::path::Path;
use std::process::Command;

use crate::env::Environment;

use super::error::ExecuteError;

/// Result of one command invocation. A non-zero exit is not an error here;
/// the calling step decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandRunner {
    /// Run `cmd` once in `cwd` with exactly the variables in `env`.
    fn run(&self, cmd: &str, cwd: &Path, env: &Environment) -> Result<CommandOutput, ExecuteError>;
}

/// Runs commands through `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, cmd: &str, cwd: &Path, env: &Environment) -> Result<CommandOutput, ExecuteError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .current_dir(cwd)
            .env_clear()
            .envs(env.iter())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
