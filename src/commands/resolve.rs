use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use super::config::Config;
use crate::{
    archive::ContentTypeProbe,
    manifest::PackageRecord,
    package::{InstalledRepository, Operation, PlatformPackage, collect_platform_packages, plan},
    runtime::Runtime,
};

/// Name Composer gives an unnamed root package.
const ROOT_PLACEHOLDER_NAME: &str = "__root__";

/// Load the root manifest.
#[tracing::instrument(skip(runtime))]
pub fn load_root<R: Runtime>(runtime: &R, path: &Path) -> Result<PackageRecord> {
    let content = runtime.read_to_string(path)?;
    let mut root: PackageRecord = serde_json::from_str(&content)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;

    if root.name.is_empty() {
        root.name = ROOT_PLACEHOLDER_NAME.to_string();
    }
    root.is_root = true;
    Ok(root)
}

/// Everything read and resolved for one project.
pub struct Resolution {
    pub root: PackageRecord,
    pub installed: InstalledRepository,
    pub packages: Vec<PlatformPackage>,
}

impl Resolution {
    /// Names of the packages whose declarations were scanned.
    pub fn parents(&self) -> Vec<&str> {
        std::iter::once(self.root.name.as_str())
            .chain(self.installed.packages().iter().map(|p| p.name.as_str()))
            .collect()
    }
}

/// Resolve every declared platform package for the configured platform.
pub async fn resolve_all<R: Runtime, P: ContentTypeProbe>(
    config: &Config<R, P>,
) -> Result<Resolution> {
    let root = load_root(&config.runtime, &config.manifest_path)?;
    let installed = InstalledRepository::load(&config.runtime, &config.installed_path)?;
    debug!(
        "Scanning {} and {} installed package(s)",
        root.name,
        installed.packages().len()
    );

    let packages = collect_platform_packages(
        &root,
        installed.packages(),
        &config.platform,
        &config.classifier,
    )
    .await?;

    Ok(Resolution {
        root,
        installed,
        packages,
    })
}

/// Print resolved platform packages as JSON.
#[tracing::instrument(skip(config))]
pub async fn resolve<R: Runtime, P: ContentTypeProbe>(config: Config<R, P>) -> Result<()> {
    let resolution = resolve_all(&config).await?;
    println!("{}", serde_json::to_string_pretty(&resolution.packages)?);
    Ok(())
}

/// Compute install decisions for resolved platform packages.
pub async fn plan_operations<R: Runtime, P: ContentTypeProbe>(
    config: &Config<R, P>,
) -> Result<Vec<Operation>> {
    let resolution = resolve_all(config).await?;
    Ok(plan(
        &resolution.packages,
        &resolution.installed,
        &resolution.parents(),
    ))
}

/// Print one install decision per line.
#[tracing::instrument(skip(config))]
pub async fn show_plan<R: Runtime, P: ContentTypeProbe>(config: Config<R, P>) -> Result<()> {
    let operations = plan_operations(&config).await?;
    if operations.is_empty() {
        println!("No platform packages declared.");
        return Ok(());
    }

    for operation in operations {
        println!("{}", operation);
    }
    Ok(())
}
