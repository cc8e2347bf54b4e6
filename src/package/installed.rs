//! Queries over the host package manager's installed packages.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::platform_package::full_package_name;
use crate::manifest::PackageRecord;
use crate::runtime::Runtime;

/// `installed.json` is either `{"packages": [...]}` or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum InstalledFile {
    Wrapped { packages: Vec<PackageRecord> },
    Bare(Vec<PackageRecord>),
}

/// Installed package records plus the directory `install-path` is relative to.
#[derive(Debug, Clone, Default)]
pub struct InstalledRepository {
    packages: Vec<PackageRecord>,
    base_dir: PathBuf,
}

impl InstalledRepository {
    pub fn new(packages: Vec<PackageRecord>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            packages,
            base_dir: base_dir.into(),
        }
    }

    pub fn from_json(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let file: InstalledFile =
            serde_json::from_str(content).context("Failed to parse installed packages")?;
        let packages = match file {
            InstalledFile::Wrapped { packages } => packages,
            InstalledFile::Bare(packages) => packages,
        };
        Ok(Self::new(packages, base_dir))
    }

    /// Load `path`; a missing file means nothing is installed.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        if !runtime.exists(path) {
            debug!("No installed packages file at {:?}", path);
            return Ok(Self::new(Vec::new(), base_dir));
        }

        let content = runtime.read_to_string(path)?;
        Self::from_json(&content, base_dir)
            .with_context(|| format!("Invalid installed packages file {}", path.display()))
    }

    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// Package names are case-insensitive.
    pub fn find(&self, name: &str) -> Option<&PackageRecord> {
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn find_platform_package(&self, parent: &str, suffix: &str) -> Option<&PackageRecord> {
        let name = full_package_name(parent, suffix).ok()?;
        self.find(&name)
    }

    pub fn is_installed(&self, parent: &str, suffix: &str) -> bool {
        self.find_platform_package(parent, suffix).is_some()
    }

    pub fn version(&self, parent: &str, suffix: &str) -> Option<String> {
        self.find_platform_package(parent, suffix)?.version().ok()
    }

    pub fn pretty_version(&self, parent: &str, suffix: &str) -> Option<&str> {
        self.find_platform_package(parent, suffix)?
            .pretty_version
            .as_deref()
    }

    /// Absolute `install-path`, resolved against the installed file's directory.
    pub fn install_path(&self, parent: &str, suffix: &str) -> Option<PathBuf> {
        let relative = self
            .find_platform_package(parent, suffix)?
            .install_path
            .as_deref()?;
        Some(self.base_dir.join(relative))
    }
}
