//! Recipe executor - drives an easyblock through its build lifecycle.
//!
//! Steps run in a fixed order, each exactly once:
//! configure -> build -> install -> sanity check -> module guesses.
//! The first failing step aborts the build; nothing is retried.

mod context;
mod error;
mod runner;
mod step;
mod util;

pub use context::Context;
pub use error::ExecuteError;
pub use runner::{CommandOutput, CommandRunner, ShellRunner};
pub use step::{Step, Strictness};
pub use util::{join_command, shell_quote};

use crate::config::PackageConfig;
use crate::easyblock::{Easyblock, ModuleGuesses};
use crate::env::Environment;
use crate::output;
use crate::sanity::InstallationLayout;

/// What a finished build leaves behind.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Configuration after every step had its say.
    pub config: PackageConfig,
    /// Environment the last command ran with.
    pub env: Environment,
    /// Paths the sanity check verified.
    pub layout: InstallationLayout,
    pub module_guesses: ModuleGuesses,
}

/// Recipe executor that runs configure, build, install and sanity check.
pub struct Executor<'r> {
    ctx: Context,
    runner: &'r dyn CommandRunner,
    env: Option<Environment>,
}

impl Executor<'static> {
    /// Create an executor that runs commands through `sh`.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            runner: &ShellRunner,
            env: None,
        }
    }
}

impl<'r> Executor<'r> {
    /// Use a different command runner.
    pub fn with_runner<'n>(self, runner: &'n dyn CommandRunner) -> Executor<'n> {
        Executor {
            ctx: self.ctx,
            runner,
            env: self.env,
        }
    }

    /// Start from this environment instead of a snapshot of the process.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run the full lifecycle of `block` for `cfg`.
    pub fn execute(
        &self,
        block: &dyn Easyblock,
        cfg: PackageConfig,
    ) -> Result<BuildReport, ExecuteError> {
        let build_root = if block.build_in_installdir() {
            self.ctx.installdir.clone()
        } else {
            self.ctx.build_dir.clone()
        };
        let work_dir = cfg.start_path(&build_root);

        if !self.ctx.dry_run {
            std::fs::create_dir_all(&work_dir)?;
            std::fs::create_dir_all(&self.ctx.installdir)?;
        }

        let env = self.env.clone().unwrap_or_else(Environment::from_process);
        let mut step = Step::new(&self.ctx, self.runner, build_root, work_dir, env);

        output::package(&format!(
            "Installing {} {} ({})",
            cfg.name,
            cfg.version,
            block.name()
        ));

        output::step("configure");
        let cfg = block.configure(&mut step, cfg)?;

        output::step("build");
        let cfg = block.build(&mut step, cfg)?;

        output::step("install");
        block.install(&mut step, &cfg)?;

        let layout = block.sanity_check_paths(&cfg);
        if self.ctx.dry_run {
            output::skip("sanity check skipped in dry-run mode");
        } else {
            output::step("sanity check");
            block.sanity_check(&step, &cfg)?;
        }

        let module_guesses = block.module_req_guess(&cfg);

        output::success(&format!("{} {} installed", cfg.name, cfg.version));
        Ok(BuildReport {
            config: cfg,
            env: step.env,
            layout,
            module_guesses,
        })
    }
}
