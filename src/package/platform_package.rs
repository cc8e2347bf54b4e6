use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::archive::{ArchiveClassifier, ArchiveKind, ContentTypeProbe};
use crate::error::ConfigError;
use crate::manifest::{PackageRecord, validate_package_config};
use crate::platform::{PlatformDescriptor, select_best};

/// Separates the parent package name from the platform package suffix.
pub const NAME_SEPARATOR: &str = "--";

/// Package type given to resolved platform packages.
const RESOLVED_PACKAGE_TYPE: &str = "library";

/// A platform package resolved for one platform, ready for the installer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlatformPackage {
    pub name: String,
    /// Pretty version
    #[serde(rename = "version")]
    pub pretty_version: String,
    #[serde(rename = "version_normalized")]
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: String,
    #[serde(rename = "installation-source")]
    pub installation_source: String,
    pub dist: Dist,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Dist {
    #[serde(rename = "type")]
    pub kind: ArchiveKind,
    pub url: String,
}

impl PlatformPackage {
    /// Resolve every `platform-packages` entry of `parent` for `current`.
    ///
    /// Fails on the first invalid declaration or on a declaration with no
    /// URL for `current`.
    #[tracing::instrument(skip(parent, current, classifier), fields(parent = %parent.name))]
    pub async fn parse<P: ContentTypeProbe>(
        parent: &PackageRecord,
        current: &PlatformDescriptor,
        classifier: &ArchiveClassifier<P>,
    ) -> Result<Vec<PlatformPackage>> {
        let mut packages = Vec::new();

        for (suffix, config) in parent.platform_packages()? {
            let name = full_package_name(&parent.name, &suffix)?;
            let validated = validate_package_config(parent, &suffix, &config)?;

            let dist_url = select_best(&validated.platforms, current)
                .with_context(|| format!("Failed to resolve platform package {}", name))?
                .to_string();

            let kind = match validated.archive_type {
                Some(kind) => kind,
                None => classifier.classify(&dist_url).await,
            };

            info!("{} {} resolved to {} ({})", name, validated.pretty_version, dist_url, kind);

            packages.push(PlatformPackage {
                name,
                pretty_version: validated.pretty_version,
                version: validated.version,
                package_type: RESOLVED_PACKAGE_TYPE.to_string(),
                installation_source: "dist".to_string(),
                dist: Dist {
                    kind,
                    url: dist_url,
                },
            });
        }

        Ok(packages)
    }
}

/// Resolve the platform packages of the root package and of every installed
/// package, in that order.
pub async fn collect_platform_packages<P: ContentTypeProbe>(
    root: &PackageRecord,
    installed: &[PackageRecord],
    current: &PlatformDescriptor,
    classifier: &ArchiveClassifier<P>,
) -> Result<Vec<PlatformPackage>> {
    let mut packages = PlatformPackage::parse(root, current, classifier).await?;

    for package in installed {
        packages.extend(PlatformPackage::parse(package, current, classifier).await?);
    }

    debug!("Collected {} platform package(s)", packages.len());
    Ok(packages)
}

/// `vendor/name` + `suffix` -> `vendor/name--suffix`.
pub fn full_package_name(parent: &str, suffix: &str) -> Result<String, ConfigError> {
    match parent.split_once('/') {
        Some((vendor, name))
            if !vendor.is_empty() && !name.is_empty() && !name.contains('/') && !suffix.is_empty() =>
        {
            Ok(format!("{}/{}{}{}", vendor, name, NAME_SEPARATOR, suffix))
        }
        _ => Err(ConfigError::InvalidPackageName(format!(
            "{}{}{}",
            parent, NAME_SEPARATOR, suffix
        ))),
    }
}

/// Split `vendor/name--suffix` back into parent name and suffix.
pub fn split_platform_package_name(name: &str) -> Option<(&str, &str)> {
    let (parent, suffix) = name.rsplit_once(NAME_SEPARATOR)?;
    full_package_name(parent, suffix).ok()?;
    Some((parent, suffix))
}
