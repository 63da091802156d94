//! Version-gated build recipes ("easyblocks") for scientific software
//!
//! An easyblock encodes how one package is configured, built, installed and
//! checked. The [`Executor`] drives it through a fixed lifecycle:
//!
//! 1. `configure` - prepare the source tree (often a no-op)
//! 2. `build` - compile; may extend the build environment and `makeopts`
//! 3. `install` - copy or install into the install dir
//! 4. `sanity_check` - every expected file and directory must exist
//! 5. `module_req_guess` - search paths a module for the package should set
//!
//! Recipes pick option sets by comparing the package version against fixed
//! thresholds with [`version::VersionGate`].
//!
//! # Example
//!
//! ```no_run
//! use levitate_easyblock::{easyblock, Context, Executor, PackageConfig};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = PackageConfig::load(Path::new("ipp.toml"))?;
//! let ctx = Context::with_installdir("/opt/ipp/9.0.1");
//! let block = easyblock::lookup(cfg.easyblock_name(), &ctx)?;
//! let report = Executor::new(ctx).execute(block.as_ref(), cfg)?;
//! println!("{:?}", report.module_guesses);
//! # Ok(())
//! # }
//! ```
//!
//! # Package Configuration
//!
//! ```toml
//! name = "ARB"
//! version = "5.5"
//! start_dir = "arbsrc"
//! makeopts = "CC=gcc"
//! ```

pub mod config;
pub mod easyblock;
pub mod env;
pub mod executor;
pub mod output;
pub mod sanity;
pub mod version;

pub use config::PackageConfig;
pub use easyblock::{Easyblock, ModuleGuesses};
pub use env::Environment;
pub use executor::{BuildReport, Context, ExecuteError, Executor};
pub use sanity::InstallationLayout;
pub use version::{Version, VersionGate};
