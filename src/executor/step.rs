//! Per-build state handed to each lifecycle step.

use std::path::{Path, PathBuf};

use crate::env::Environment;
use crate::output;

use super::context::Context;
use super::error::ExecuteError;
use super::runner::{CommandOutput, CommandRunner};

/// How a step treats a non-zero exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Non-zero exit fails the step with [`ExecuteError::BuildStep`].
    Strict,
    /// Non-zero exit is logged and returned to the caller.
    Tolerant,
}

/// State shared by the lifecycle steps of one build.
pub struct Step<'a> {
    ctx: &'a Context,
    runner: &'a dyn CommandRunner,
    build_root: PathBuf,
    work_dir: PathBuf,
    /// Environment passed to every command this build runs.
    pub env: Environment,
}

impl<'a> Step<'a> {
    pub fn new(
        ctx: &'a Context,
        runner: &'a dyn CommandRunner,
        build_root: PathBuf,
        work_dir: PathBuf,
        env: Environment,
    ) -> Self {
        Self {
            ctx,
            runner,
            build_root,
            work_dir,
            env,
        }
    }

    pub fn context(&self) -> &Context {
        self.ctx
    }

    pub fn installdir(&self) -> &Path {
        &self.ctx.installdir
    }

    /// Root the package is built under: the build dir, or the install dir for
    /// recipes that build in place.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Directory commands run in (`start_dir` under the build root).
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run one command in the work dir.
    pub fn run(&self, cmd: &str, strictness: Strictness) -> Result<CommandOutput, ExecuteError> {
        if self.ctx.verbose || self.ctx.dry_run {
            output::note(&format!(
                "[{}] {}",
                if self.ctx.dry_run { "dry-run" } else { "exec" },
                cmd
            ));
        }

        if self.ctx.dry_run {
            return Ok(CommandOutput::success());
        }

        tracing::debug!(cmd, cwd = %self.work_dir.display(), ?strictness, "running command");
        let spinner = (!self.ctx.verbose).then(|| output::command_spinner(cmd));
        let result = self.runner.run(cmd, &self.work_dir, &self.env);
        if let Some(pb) = spinner {
            output::finish_spinner(pb);
        }
        let out = result?;

        if out.is_success() {
            return Ok(out);
        }

        match strictness {
            Strictness::Strict => Err(ExecuteError::BuildStep {
                cmd: cmd.to_string(),
                code: out.code,
                stderr: out.stderr,
            }),
            Strictness::Tolerant => {
                tracing::warn!(cmd, code = ?out.code, "command failed, continuing");
                output::warning(&format!(
                    "'{}' exited with {:?}, continuing",
                    cmd, out.code
                ));
                Ok(out)
            }
        }
    }
}
