//! Common test utilities: temp build trees and fake toolchain scripts.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use levitate_easyblock::{Context, Environment, InstallationLayout};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp dir holding `install/`, `build/` and a `bin/` for fake tools.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["install", "build", "bin"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn installdir(&self) -> PathBuf {
        self.dir.path().join("install")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.dir.path().join("build")
    }

    pub fn tool_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn context(&self) -> Context {
        Context::with_installdir(self.installdir())
            .build_dir(self.build_dir())
            .nproc(2)
    }

    /// Process environment with the fake tool dir first on PATH.
    pub fn environment(&self) -> Environment {
        let mut env = Environment::from_process();
        env.prepend_path("PATH", [self.tool_dir().display().to_string()]);
        env
    }

    /// Install an executable shell script as a fake tool.
    pub fn tool(&self, name: &str, body: &str) -> PathBuf {
        write_script(&self.tool_dir().join(name), body)
    }
}

pub fn write_script(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

/// Write a layout as `f <path>` / `d <path>` lines for the fake installer.
pub fn write_layout(path: &Path, layout: &InstallationLayout) {
    let mut lines = Vec::new();
    lines.extend(layout.files.iter().map(|f| format!("f {}", f)));
    lines.extend(layout.dirs.iter().map(|d| format!("d {}", d)));
    std::fs::write(path, lines.join("\n") + "\n").unwrap();
}
