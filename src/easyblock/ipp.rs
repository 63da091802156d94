//! Intel Integrated Performance Primitives (IPP).
//!
//! Installed with the Intel silent installer. The installer's key names, the
//! sanity-check layout and the module search paths all depend on the IPP
//! release:
//!
//! | version | silent.cfg names | extras | layout |
//! |---|---|---|---|
//! | `< 8.0` | install mode (2015) | none | 2012-era dirs, 15 libraries |
//! | `< 9.0` | install mode (2015) | none | composerxe dirs, 15 libraries |
//! | `9.0` | defaults | none | composerxe dirs, 8 libraries |
//! | `> 9.0` | defaults | `ARCH_SELECTED` | flat dirs, 8 libraries |

use crate::config::PackageConfig;
use crate::easyblock::generic::intel_base::{
    ACTIVATION_NAME_2012, INSTALL_MODE_2015, INSTALL_MODE_NAME_2015, LICENSE_FILE_NAME_2012,
};
use crate::easyblock::generic::{IntelBase, SilentCfgNamesMap};
use crate::easyblock::{default_module_req_guess, Easyblock, ModuleGuesses};
use crate::executor::{ExecuteError, Step};
use crate::sanity::InstallationLayout;
use crate::version::{select_layered, Version, VersionGate};

/// Machine identifier installed as the 32-bit variant.
pub const IA32_MACHINE: &str = "i386";

/// Architecture tag the installer and library directories use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntelArch {
    Ia32,
    Intel64,
}

impl IntelArch {
    /// `i386` is the only 32-bit machine; everything else is `intel64`.
    pub fn from_machine(machine: &str) -> Self {
        if machine == IA32_MACHINE {
            IntelArch::Ia32
        } else {
            IntelArch::Intel64
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntelArch::Ia32 => "ia32",
            IntelArch::Intel64 => "intel64",
        }
    }
}

const BEFORE_8: VersionGate = VersionGate::lt(Version::new(8, 0, 0));
const BEFORE_9: VersionGate = VersionGate::lt(Version::new(9, 0, 0));
const FROM_9: VersionGate = VersionGate::ge(Version::new(9, 0, 0));
const AFTER_9: VersionGate = VersionGate::gt(Version::new(9, 0, 0));

const NAMES_2012: SilentCfgNamesMap = SilentCfgNamesMap {
    activation_name: Some(ACTIVATION_NAME_2012),
    license_file_name: Some(LICENSE_FILE_NAME_2012),
    install_mode_name: None,
    install_mode: None,
};

const NAMES_2015: SilentCfgNamesMap = SilentCfgNamesMap {
    activation_name: None,
    license_file_name: None,
    install_mode_name: Some(INSTALL_MODE_NAME_2015),
    install_mode: Some(INSTALL_MODE_2015),
};

const LIBS_PRE_9: &[&str] = &[
    "ac", "cc", "ch", "core", "cv", "dc", "di", "i", "j", "m", "r", "s", "sc", "vc", "vm",
];

const LIBS_9: &[&str] = &["cc", "ch", "core", "cv", "dc", "i", "s", "vm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipp {
    arch: IntelArch,
}

impl Ipp {
    pub fn new(arch: IntelArch) -> Self {
        Self { arch }
    }

    pub fn for_machine(machine: &str) -> Self {
        Self::new(IntelArch::from_machine(machine))
    }

    pub fn arch(&self) -> IntelArch {
        self.arch
    }

    /// Names map for the installer.
    ///
    /// Both gates are evaluated and the later match wins, so every release
    /// below 9.0 ends up with the 2015 install-mode names.
    pub fn silent_cfg_names_map(&self, cfg: &PackageConfig) -> Option<SilentCfgNamesMap> {
        select_layered(
            &cfg.version,
            &[
                (BEFORE_8, NAMES_2012),
                (BEFORE_9, NAMES_2015),
            ],
        )
    }

    /// Extra silent.cfg lines; IPP 2016 and later need the target arch.
    pub fn silent_cfg_extras(&self, cfg: &PackageConfig) -> Vec<(String, String)> {
        if AFTER_9.matches(&cfg.version) {
            vec![(
                "ARCH_SELECTED".to_string(),
                self.arch.as_str().to_uppercase(),
            )]
        } else {
            Vec::new()
        }
    }
}

impl Easyblock for Ipp {
    fn name(&self) -> &'static str {
        "ipp"
    }

    fn install(&self, step: &mut Step<'_>, cfg: &PackageConfig) -> Result<(), ExecuteError> {
        let names_map = self.silent_cfg_names_map(cfg);
        let extras = self.silent_cfg_extras(cfg);
        IntelBase::install_step(step, cfg, names_map.as_ref(), &extras)
    }

    fn sanity_check_paths(&self, cfg: &PackageConfig) -> InstallationLayout {
        let version = &cfg.version;

        let dirs: &[&str] = if BEFORE_8.matches(version) {
            &[
                "compiler/lib/intel64",
                "ipp/bin",
                "ipp/include",
                "ipp/interfaces/data-compression",
                "ipp/tools/intel64",
            ]
        } else if AFTER_9.matches(version) {
            &["ipp/bin", "ipp/include", "ipp/tools/intel64"]
        } else {
            &[
                "composerxe/lib/intel64",
                "ipp/bin",
                "ipp/include",
                "ipp/tools/intel64",
            ]
        };

        let libs = if FROM_9.matches(version) {
            LIBS_9
        } else {
            LIBS_PRE_9
        };

        let files = libs
            .iter()
            .flat_map(|lib| {
                ["a", "so"]
                    .into_iter()
                    .map(move |ext| format!("ipp/lib/intel64/libipp{}.{}", lib, ext))
            })
            .collect();

        InstallationLayout::new(files, dirs.iter().map(|d| d.to_string()).collect())
    }

    fn module_req_guess(&self, cfg: &PackageConfig) -> ModuleGuesses {
        let mut guesses = default_module_req_guess();

        if AFTER_9.matches(&cfg.version) {
            let lib_path = format!("lib/{}", self.arch.as_str());
            let include_path = "ipp/include".to_string();

            guesses.insert("LD_LIBRARY_PATH".to_string(), vec![lib_path.clone()]);
            guesses.insert("LIBRARY_PATH".to_string(), vec![lib_path]);
            guesses.insert("CPATH".to_string(), vec![include_path.clone()]);
            guesses.insert("INCLUDE".to_string(), vec![include_path]);
        }

        guesses
    }
}
