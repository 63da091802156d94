//! Intel installers driven by a silent configuration file.
//!
//! The installer reads `KEY=value` lines from `silent.cfg`. Key names changed
//! between installer releases, so recipes pass a [`SilentCfgNamesMap`] that
//! replaces some of the default names, plus free-form extras.

use std::path::{Path, PathBuf};

use crate::config::PackageConfig;
use crate::easyblock::Easyblock;
use crate::executor::{join_command, shell_quote, ExecuteError, Step, Strictness};
use crate::output;

pub const ACTIVATION_NAME: &str = "ACTIVATION_TYPE";
pub const ACTIVATION_NAME_2012: &str = "ACTIVATION";
pub const LICENSE_FILE_NAME: &str = "ACTIVATION_LICENSE_FILE";
pub const LICENSE_FILE_NAME_2012: &str = "PSET_LICENSE_FILE";
pub const INSTALL_MODE_NAME: &str = "INSTALL_MODE";
pub const INSTALL_MODE: &str = "NONRPM";
pub const INSTALL_MODE_NAME_2015: &str = "PSET_MODE";
pub const INSTALL_MODE_2015: &str = "install";

pub const ACTIVATION_LIC_FILE: &str = "license_file";
pub const ACTIVATION_LIC_SERVER: &str = "license_server";

pub const SILENT_CFG_FILENAME: &str = "silent.cfg";

/// Key names written to the silent config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilentCfgNames {
    pub activation_name: &'static str,
    pub license_file_name: &'static str,
    pub install_mode_name: &'static str,
    pub install_mode: &'static str,
}

impl Default for SilentCfgNames {
    fn default() -> Self {
        Self {
            activation_name: ACTIVATION_NAME,
            license_file_name: LICENSE_FILE_NAME,
            install_mode_name: INSTALL_MODE_NAME,
            install_mode: INSTALL_MODE,
        }
    }
}

impl SilentCfgNames {
    /// Replace the names set in `map`; unset entries keep their value.
    pub fn with_overrides(self, map: &SilentCfgNamesMap) -> Self {
        Self {
            activation_name: map.activation_name.unwrap_or(self.activation_name),
            license_file_name: map.license_file_name.unwrap_or(self.license_file_name),
            install_mode_name: map.install_mode_name.unwrap_or(self.install_mode_name),
            install_mode: map.install_mode.unwrap_or(self.install_mode),
        }
    }
}

/// Partial override of [`SilentCfgNames`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilentCfgNamesMap {
    pub activation_name: Option<&'static str>,
    pub license_file_name: Option<&'static str>,
    pub install_mode_name: Option<&'static str>,
    pub install_mode: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SilentCfg {
    pub names: SilentCfgNames,
    /// `port@host` license servers activate differently from license files.
    pub license: String,
    pub installdir: PathBuf,
    pub extras: Vec<(String, String)>,
}

impl SilentCfg {
    pub fn activation(&self) -> &'static str {
        if is_license_server(&self.license) {
            ACTIVATION_LIC_SERVER
        } else {
            ACTIVATION_LIC_FILE
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("{}={}", self.names.activation_name, self.activation()),
            format!("{}={}", self.names.license_file_name, self.license),
            format!("PSET_INSTALL_DIR={}", self.installdir.display()),
            "ACCEPT_EULA=accept".to_string(),
            format!("{}={}", self.names.install_mode_name, self.names.install_mode),
            "CONTINUE_WITH_OPTIONAL_ERROR=yes".to_string(),
            "CONTINUE_WITH_INSTALLDIR_OVERWRITE=yes".to_string(),
        ];
        lines.extend(self.extras.iter().map(|(k, v)| format!("{}={}", k, v)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn is_license_server(license: &str) -> bool {
    license
        .split_once('@')
        .is_some_and(|(port, host)| {
            !host.is_empty() && port.chars().all(|c| c.is_ascii_digit())
        })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IntelBase;

impl IntelBase {
    /// Write the silent config and run the installer once.
    pub fn install_step(
        step: &mut Step<'_>,
        cfg: &PackageConfig,
        names_map: Option<&SilentCfgNamesMap>,
        extras: &[(String, String)],
    ) -> Result<(), ExecuteError> {
        let license = resolve_license(step, cfg)?;

        let names = match names_map {
            Some(map) => SilentCfgNames::default().with_overrides(map),
            None => SilentCfgNames::default(),
        };
        let silent = SilentCfg {
            names,
            license,
            installdir: step.installdir().to_path_buf(),
            extras: extras.to_vec(),
        };

        let cfg_path = step.build_root().join(SILENT_CFG_FILENAME);
        write_silent_cfg(step, &cfg_path, &silent)?;

        let cmd = join_command([
            "./install.sh",
            "-s",
            &shell_quote(cfg_path.display()),
            &cfg.installopts,
        ]);
        step.run(&cmd, Strictness::Strict)?;
        Ok(())
    }
}

/// `license_file` from the config, else `$INTEL_LICENSE_FILE`.
fn resolve_license(step: &Step<'_>, cfg: &PackageConfig) -> Result<String, ExecuteError> {
    let license = match (&cfg.license_file, step.env.get("INTEL_LICENSE_FILE")) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(env)) if !env.is_empty() => env.to_string(),
        _ => return Err(ExecuteError::MissingOption("license_file".to_string())),
    };

    if !is_license_server(&license) && !step.context().dry_run && !Path::new(&license).is_file() {
        return Err(ExecuteError::MissingOption(format!(
            "license_file (not found: {})",
            license
        )));
    }
    Ok(license)
}

fn write_silent_cfg(step: &Step<'_>, path: &Path, silent: &SilentCfg) -> Result<(), ExecuteError> {
    let content = silent.render();
    if step.context().dry_run {
        output::note(&format!("[dry-run] write {}", path.display()));
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &content)?;
    tracing::debug!(path = %path.display(), %content, "wrote silent config");
    Ok(())
}

impl Easyblock for IntelBase {
    fn name(&self) -> &'static str {
        "IntelBase"
    }

    fn install(&self, step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        Self::install_step(step, cfg, None, &[])
    }
}
