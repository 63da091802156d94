//! Easyblocks: package-specific build recipes.
//!
//! An easyblock implements the [`Easyblock`] lifecycle. Every step has a
//! default, so a recipe only overrides what its package needs:
//!
//! | step | default |
//! |---|---|
//! | `configure` | no-op |
//! | `build` | no-op |
//! | `install` | no-op |
//! | `sanity_check` | check [`Easyblock::sanity_check_paths`] under the install dir |
//! | `module_req_guess` | [`default_module_req_guess`] |
//!
//! Generic recipes shared by several packages live in [`generic`]; their
//! step bodies are plain functions so package recipes can call them the way
//! a subclass calls its parent.

pub mod arb;
pub mod generic;
pub mod ipp;

use std::collections::BTreeMap;

use crate::config::PackageConfig;
use crate::executor::{Context, ExecuteError, Step};
use crate::sanity::InstallationLayout;

pub use arb::Arb;
pub use generic::{ConfigureMake, IntelBase};
pub use ipp::Ipp;

/// Environment variable name to paths (relative to the install dir) that a
/// module for the package should prepend to it.
pub type ModuleGuesses = BTreeMap<String, Vec<String>>;

pub trait Easyblock {
    /// Name the recipe is registered under.
    fn name(&self) -> &'static str;

    /// Build directly in the install dir instead of the build dir.
    fn build_in_installdir(&self) -> bool {
        false
    }

    fn configure(
        &self,
        _step: &mut Step<'_>,
        cfg: PackageConfig,
    ) -> Result<PackageConfig, ExecuteError> {
        Ok(cfg)
    }

    fn build(
        &self,
        _step: &mut Step<'_>,
        cfg: PackageConfig,
    ) -> Result<PackageConfig, ExecuteError> {
        Ok(cfg)
    }

    fn install(&self, _step: &mut Step<'_>, _cfg: &PackageConfig) -> Result<(), ExecuteError> {
        Ok(())
    }

    /// Files and directories that must exist after installation.
    fn sanity_check_paths(&self, _cfg: &PackageConfig) -> InstallationLayout {
        InstallationLayout::default()
    }

    fn sanity_check(&self, step: &Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        self.sanity_check_paths(cfg).check(step.installdir())
    }

    /// Must not depend on anything but `cfg` and the recipe itself.
    fn module_req_guess(&self, _cfg: &PackageConfig) -> ModuleGuesses {
        default_module_req_guess()
    }
}

/// Search paths most packages install into.
pub fn default_module_req_guess() -> ModuleGuesses {
    let entries: [(&str, &[&str]); 8] = [
        ("PATH", &["bin", "sbin"]),
        ("LD_LIBRARY_PATH", &["lib", "lib32", "lib64"]),
        ("LIBRARY_PATH", &["lib", "lib32", "lib64"]),
        ("CPATH", &["include"]),
        ("MANPATH", &["man", "share/man"]),
        (
            "PKG_CONFIG_PATH",
            &["lib/pkgconfig", "lib32/pkgconfig", "lib64/pkgconfig", "share/pkgconfig"],
        ),
        ("ACLOCAL_PATH", &["share/aclocal"]),
        ("CLASSPATH", &["*.jar"]),
    ];

    entries
        .into_iter()
        .map(|(var, paths)| {
            (
                var.to_string(),
                paths.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

/// Registered recipe names, as accepted by [`lookup`].
pub const AVAILABLE: &[&str] = &["ARB", "ConfigureMake", "IntelBase", "ipp"];

/// Find the recipe registered under `name` (case-insensitive).
pub fn lookup(name: &str, ctx: &Context) -> Result<Box<dyn Easyblock>, ExecuteError> {
    let block: Box<dyn Easyblock> = match name.to_ascii_lowercase().as_str() {
        "arb" => Box::new(Arb),
        "configuremake" => Box::new(ConfigureMake),
        "intelbase" => Box::new(IntelBase),
        "ipp" => Box::new(Ipp::for_machine(&ctx.arch)),
        _ => return Err(ExecuteError::UnknownEasyblock(name.to_string())),
    };
    Ok(block)
}
