//! Where a package is built and installed, and how commands are echoed.

use std::path::PathBuf;

/// Host-side settings shared by every step of one easyblock run.
///
/// Package-specific values (name, version, makeopts, license) live in
/// [`PackageConfig`](crate::PackageConfig); this only says where and how.
#[derive(Debug, Clone)]
pub struct Context {
    /// Prefix the package is installed into; sanity paths are relative to it
    pub installdir: PathBuf,
    /// Parent of the unpacked source tree
    pub build_dir: PathBuf,
    /// Machine identifier, e.g. "x86_64" or "i386"
    pub arch: String,
    /// Value handed to `make -j`
    pub nproc: usize,
    /// Echo shell commands and skip them; no files are written
    pub dry_run: bool,
    /// Echo each shell command and show its output instead of a spinner
    pub verbose: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            installdir: PathBuf::from("/usr/local"),
            build_dir: std::env::temp_dir().join("easyblock-build"),
            arch: std::env::consts::ARCH.to_string(),
            nproc: num_cpus::get(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl Context {
    /// Host defaults with the install prefix set to `installdir`.
    pub fn with_installdir(installdir: impl Into<PathBuf>) -> Self {
        Self {
            installdir: installdir.into(),
            ..Default::default()
        }
    }

    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    /// Override the host machine identifier (`i386` selects the 32-bit IPP).
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Parallel make jobs, never below one.
    pub fn nproc(mut self, nproc: usize) -> Self {
        self.nproc = nproc.max(1);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nproc_floor() {
        assert_eq!(Context::default().nproc(0).nproc, 1);
        assert_eq!(Context::default().nproc(16).nproc, 16);
    }

    #[test]
    fn test_host_arch_by_default() {
        let ctx = Context::with_installdir("/opt/ipp");
        assert_eq!(ctx.arch, std::env::consts::ARCH);
        assert_eq!(ctx.installdir, PathBuf::from("/opt/ipp"));
        assert!(!ctx.dry_run);
    }
}
