//! Validation of declared platform URLs.
//!
//! Two callers, two contracts: package-level declarations are rejected on
//! the first bad URL ([`validate_platforms`], [`validate_package_config`]),
//! while install-time `platform-urls` drop bad URLs with a warning
//! ([`resolve_platform_urls`]).

use log::{debug, warn};
use reqwest::Url;
use serde_json::Value;

use super::record::{PackageRecord, PlatformPackageConfig, RawPlatforms, urls_of};
use super::version::{DEV_VERSION, normalize_version};
use crate::archive::ArchiveKind;
use crate::error::ConfigError;
use crate::platform::PlatformUrlMap;

/// Placeholder replaced by the pretty version in every URL.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// A `platform-packages` entry after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPackageConfig {
    pub version: String,
    pub pretty_version: String,
    pub archive_type: Option<ArchiveKind>,
    pub platforms: PlatformUrlMap,
}

pub fn substitute_version(url: &str, pretty_version: &str) -> String {
    url.replace(VERSION_PLACEHOLDER, pretty_version)
}

/// Reject anything that is not an absolute, hierarchical URL.
pub fn check_url(url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }
    if url.trim() != url || url.contains(char::is_whitespace) {
        return Err(invalid("contains whitespace".to_string()));
    }
    Ok(())
}

/// Substitute `{version}` and check every URL, failing on the first bad one.
pub fn validate_platforms(
    raw: &RawPlatforms,
    pretty_version: &str,
) -> Result<PlatformUrlMap, ConfigError> {
    let mut validated = PlatformUrlMap::new();

    for (platform, value) in raw {
        let urls = urls_of(platform, value)?
            .iter()
            .map(|url| {
                let url = substitute_version(url, pretty_version);
                check_url(&url)?;
                Ok(url)
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        validated.insert(platform, urls);
    }

    Ok(validated)
}

/// Validate one `platform-packages` entry declared by `parent`.
///
/// Version precedence: the entry's own `version`, then [`DEV_VERSION`] for
/// the root package, then the parent's version.
pub fn validate_package_config(
    parent: &PackageRecord,
    name: &str,
    config: &PlatformPackageConfig,
) -> Result<ValidatedPackageConfig, ConfigError> {
    check_package_suffix(name)?;

    let (version, pretty_version) = match &config.version {
        Some(pretty) => (normalize_version(pretty)?, pretty.clone()),
        None if parent.is_root => (normalize_version(DEV_VERSION)?, DEV_VERSION.to_string()),
        None => (parent.version()?, parent.pretty_version().to_string()),
    };

    let raw = match &config.platforms {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => {
            return Err(ConfigError::MissingPlatforms {
                package: name.to_string(),
            });
        }
    };

    let platforms = validate_platforms(raw, &pretty_version)?;

    let archive_type = config
        .archive_type
        .as_deref()
        .map(str::parse::<ArchiveKind>)
        .transpose()?;

    debug!(
        "Validated platform package {} ({}) with {} platform(s)",
        name,
        pretty_version,
        platforms.len()
    );

    Ok(ValidatedPackageConfig {
        version,
        pretty_version,
        archive_type,
        platforms,
    })
}

/// Install-time variant of [`validate_platforms`]: invalid URLs and entries
/// are reported and skipped instead of failing.
pub fn resolve_platform_urls(
    package_name: &str,
    raw: &RawPlatforms,
    pretty_version: &str,
) -> PlatformUrlMap {
    let mut resolved = PlatformUrlMap::new();

    for (platform, value) in raw {
        let urls = match urls_of(platform, value) {
            Ok(urls) => urls,
            Err(e) => {
                warn!("{}: {}. Skipping...", package_name, e);
                continue;
            }
        };

        let urls = urls
            .iter()
            .map(|url| substitute_version(url, pretty_version))
            .filter(|url| match check_url(url) {
                Ok(()) => true,
                Err(_) => {
                    warn!("{}: Invalid URL : {}. Skipping...", package_name, url);
                    false
                }
            })
            .collect();

        resolved.insert(platform, urls);
    }

    resolved
}

/// Suffixes become part of a package name: `[A-Za-z0-9._-]+`.
fn check_package_suffix(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidPackageName(name.to_string()))
    }
}
