//! Generic easyblocks shared by package recipes.

pub mod configure_make;
pub mod intel_base;

pub use configure_make::ConfigureMake;
pub use intel_base::{IntelBase, SilentCfg, SilentCfgNames, SilentCfgNamesMap};
