//! `./configure && make && make install` packages.

use crate::config::PackageConfig;
use crate::easyblock::Easyblock;
use crate::executor::{join_command, shell_quote, ExecuteError, Step, Strictness};
use crate::sanity::InstallationLayout;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigureMake;

impl ConfigureMake {
    /// `./configure --prefix=<installdir> <configopts>`
    pub fn configure_step(step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        let prefix = format!("--prefix={}", shell_quote(step.installdir().display()));
        let cmd = join_command(["./configure", &prefix, &cfg.configopts]);
        step.run(&cmd, Strictness::Strict)?;
        Ok(())
    }

    /// `make -j<parallel> <makeopts>`
    pub fn build_step(step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        let jobs = cfg.parallel.unwrap_or(step.context().nproc).max(1);
        let cmd = join_command(["make", &format!("-j{}", jobs), &cfg.makeopts]);
        step.run(&cmd, Strictness::Strict)?;
        Ok(())
    }

    /// `make install <installopts>`
    pub fn install_step(step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        let cmd = join_command(["make install", &cfg.installopts]);
        step.run(&cmd, Strictness::Strict)?;
        Ok(())
    }
}

impl Easyblock for ConfigureMake {
    fn name(&self) -> &'static str {
        "ConfigureMake"
    }

    fn configure(
        &self,
        step: &mut Step<'_>,
        cfg: PackageConfig,
    ) -> Result<PackageConfig, ExecuteError> {
        Self::configure_step(step, &cfg)?;
        Ok(cfg)
    }

    fn build(
        &self,
        step: &mut Step<'_>,
        cfg: PackageConfig,
    ) -> Result<PackageConfig, ExecuteError> {
        Self::build_step(step, &cfg)?;
        Ok(cfg)
    }

    fn install(&self, step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        Self::install_step(step, cfg)
    }

    fn sanity_check_paths(&self, _cfg: &PackageConfig) -> InstallationLayout {
        InstallationLayout::new(Vec::new(), vec!["bin".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::executor::{CommandOutput, CommandRunner, Context};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl CommandRunner for Recorder {
        fn run(
            &self,
            cmd: &str,
            _cwd: &Path,
            _env: &Environment,
        ) -> Result<CommandOutput, ExecuteError> {
            self.0.borrow_mut().push(cmd.to_string());
            Ok(CommandOutput::success())
        }
    }

    fn run_steps(cfg: PackageConfig) -> Vec<String> {
        let ctx = Context::with_installdir("/opt/pkg 1.0").nproc(4);
        let recorder = Recorder::default();
        let mut step = Step::new(
            &ctx,
            &recorder,
            PathBuf::from("/tmp/build"),
            PathBuf::from("/tmp/build"),
            Environment::new(),
        );
        let block = ConfigureMake;
        let cfg = block.configure(&mut step, cfg).unwrap();
        let cfg = block.build(&mut step, cfg).unwrap();
        block.install(&mut step, &cfg).unwrap();
        drop(step);
        recorder.0.into_inner()
    }

    #[test]
    fn test_default_commands() {
        let cfg = PackageConfig::new("zlib", "1.2.8".parse().unwrap());
        assert_eq!(
            run_steps(cfg),
            vec![
                "./configure --prefix='/opt/pkg 1.0'",
                "make -j4",
                "make install",
            ]
        );
    }

    #[test]
    fn test_options_are_passed_through() {
        let mut cfg = PackageConfig::new("zlib", "1.2.8".parse().unwrap());
        cfg.configopts = "--static".to_string();
        cfg.makeopts = "CC=gcc".to_string();
        cfg.installopts = "DESTDIR=/stage".to_string();
        cfg.parallel = Some(2);
        assert_eq!(
            run_steps(cfg),
            vec![
                "./configure --prefix='/opt/pkg 1.0' --static",
                "make -j2 CC=gcc",
                "make install DESTDIR=/stage",
            ]
        );
    }
}
