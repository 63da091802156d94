//! Package configuration.
//!
//! A [`PackageConfig`] is the resolved build configuration of one package
//! instance, read from a TOML file:
//!
//! ```toml
//! name = "ipp"
//! version = "9.0.1"
//! license_file = "/opt/intel/licenses/server.lic"
//! installopts = "--user-mode"
//! ```
//!
//! The value is never mutated in place. Steps that need to change an option
//! take the config by value and return the updated one.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid package config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("package name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    pub name: String,
    pub version: Version,

    /// Recipe to use; defaults to the one registered for `name`.
    #[serde(default)]
    pub easyblock: Option<String>,

    /// Source directory relative to the build root.
    #[serde(default)]
    pub start_dir: String,

    #[serde(default)]
    pub configopts: String,

    #[serde(default)]
    pub makeopts: String,

    #[serde(default)]
    pub installopts: String,

    /// License file handed to proprietary installers.
    #[serde(default)]
    pub license_file: Option<PathBuf>,

    /// Parallel build jobs; falls back to the executor's CPU count.
    #[serde(default)]
    pub parallel: Option<usize>,
}

impl PackageConfig {
    /// Minimal config with every option at its default.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            easyblock: None,
            start_dir: String::new(),
            configopts: String::new(),
            makeopts: String::new(),
            installopts: String::new(),
            license_file: None,
            parallel: None,
        }
    }

    pub fn from_toml_str(s: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if cfg.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Append build options, space-separated.
    pub fn append_makeopts(mut self, opts: &str) -> Self {
        self.makeopts = append_opts(&self.makeopts, opts);
        self
    }

    pub fn with_start_dir(mut self, dir: impl Into<String>) -> Self {
        self.start_dir = dir.into();
        self
    }

    pub fn with_license_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.license_file = Some(path.into());
        self
    }

    /// Name of the recipe that should handle this package.
    pub fn easyblock_name(&self) -> &str {
        self.easyblock.as_deref().unwrap_or(&self.name)
    }

    /// `start_dir` joined onto `root`; an empty start dir is the root itself.
    pub fn start_path(&self, root: &Path) -> PathBuf {
        if self.start_dir.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.start_dir)
        }
    }

    /// A path relative to the install root, prefixed with `start_dir`.
    pub fn start_relative(&self, rel: &str) -> String {
        if self.start_dir.is_empty() {
            rel.to_string()
        } else {
            format!("{}/{}", self.start_dir.trim_end_matches('/'), rel)
        }
    }
}

fn append_opts(current: &str, extra: &str) -> String {
    match (current.trim().is_empty(), extra.trim().is_empty()) {
        (true, _) => extra.trim().to_string(),
        (false, true) => current.to_string(),
        (false, false) => format!("{} {}", current.trim_end(), extra.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<PackageConfig, ConfigError> {
        PackageConfig::from_toml_str(s, Path::new("test.toml"))
    }

    #[test]
    fn test_minimal_config() {
        let cfg = parse(
            r#"
name = "ARB"
version = "5.5"
"#,
        )
        .unwrap();
        assert_eq!(cfg.name, "ARB");
        assert_eq!(cfg.version.to_string(), "5.5");
        assert_eq!(cfg.start_dir, "");
        assert_eq!(cfg.makeopts, "");
        assert!(cfg.license_file.is_none());
        assert_eq!(cfg.easyblock_name(), "ARB");
    }

    #[test]
    fn test_full_config() {
        let cfg = parse(
            r#"
name = "ipp"
version = "9.0.1"
easyblock = "ipp"
start_dir = "l_ipp_9.0.1"
configopts = "--enable-foo"
makeopts = "CC=gcc"
installopts = "--user-mode"
license_file = "/licenses/intel.lic"
parallel = 8
"#,
        )
        .unwrap();
        assert_eq!(cfg.start_dir, "l_ipp_9.0.1");
        assert_eq!(cfg.license_file, Some(PathBuf::from("/licenses/intel.lic")));
        assert_eq!(cfg.parallel, Some(8));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = parse(
            r#"
name = "x"
version = "1.0"
makeopt = "typo"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = parse(
            r#"
name = "  "
version = "1.0"
"#,
        );
        assert!(matches!(result, Err(ConfigError::EmptyName)));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let result = parse(
            r#"
name = "x"
version = "latest"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_append_makeopts() {
        let cfg = PackageConfig::new("ARB", "5.5".parse().unwrap());
        let cfg = cfg.append_makeopts("all OPENGL=0");
        assert_eq!(cfg.makeopts, "all OPENGL=0");
        let cfg = cfg.append_makeopts("V=1");
        assert_eq!(cfg.makeopts, "all OPENGL=0 V=1");
        let cfg = cfg.append_makeopts("  ");
        assert_eq!(cfg.makeopts, "all OPENGL=0 V=1");
    }

    #[test]
    fn test_append_leaves_original_untouched() {
        let original = PackageConfig::new("ARB", "5.5".parse().unwrap());
        let updated = original.clone().append_makeopts("V=1");
        assert_eq!(original.makeopts, "");
        assert_eq!(updated.makeopts, "V=1");
    }

    #[test]
    fn test_start_paths() {
        let cfg = PackageConfig::new("ARB", "5.5".parse().unwrap());
        assert_eq!(cfg.start_path(Path::new("/opt/arb")), PathBuf::from("/opt/arb"));
        assert_eq!(cfg.start_relative("bin"), "bin");

        let cfg = cfg.with_start_dir("arbsrc/");
        assert_eq!(
            cfg.start_path(Path::new("/opt/arb")),
            PathBuf::from("/opt/arb/arbsrc/")
        );
        assert_eq!(cfg.start_relative("bin/arb"), "arbsrc/bin/arb");
    }
}
