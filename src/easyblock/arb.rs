//! ARB, built in place in the install dir.

use crate::config::PackageConfig;
use crate::easyblock::generic::ConfigureMake;
use crate::easyblock::{default_module_req_guess, Easyblock, ModuleGuesses};
use crate::executor::{ExecuteError, Step, Strictness};
use crate::sanity::InstallationLayout;

/// No OpenGL support, verbose, 64-bit.
pub const ARB_MAKEOPTS: &str = "all OPENGL=0 V=1 ARB_64=1";

#[derive(Debug, Default, Clone, Copy)]
pub struct Arb;

impl Easyblock for Arb {
    fn name(&self) -> &'static str {
        "ARB"
    }

    fn build_in_installdir(&self) -> bool {
        true
    }

    fn build(
        &self,
        step: &mut Step<'_>,
        cfg: PackageConfig,
    ) -> Result<PackageConfig, ExecuteError> {
        let arbhome = step.work_dir().display().to_string();
        step.env.set("ARBHOME", arbhome.clone());
        step.env.prepend_path("PATH", [format!("{}/bin", arbhome)]);
        step.env.prepend_path(
            "LD_LIBRARY_PATH",
            [format!("{}/lib", arbhome), format!("{}/LIBLINK", arbhome)],
        );

        let cfg = cfg.append_makeopts(ARB_MAKEOPTS);

        // bare `make` configures the tree and may exit non-zero
        step.run("make", Strictness::Tolerant)?;

        ConfigureMake::build_step(step, &cfg)?;
        Ok(cfg)
    }

    fn sanity_check_paths(&self, cfg: &PackageConfig) -> InstallationLayout {
        InstallationLayout::new(
            vec![cfg.start_relative("bin/arb")],
            vec![cfg.start_relative("lib")],
        )
    }

    fn module_req_guess(&self, cfg: &PackageConfig) -> ModuleGuesses {
        let mut guesses = default_module_req_guess();
        guesses.insert("CPATH".to_string(), vec![cfg.start_relative("include")]);
        guesses.insert("PATH".to_string(), vec![cfg.start_relative("bin")]);
        guesses.insert(
            "LD_LIBRARY_PATH".to_string(),
            vec![cfg.start_relative("lib")],
        );
        guesses
    }
}
