use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::version::normalize_version;
use crate::error::ConfigError;

/// `extra` key holding the platform package declarations of a package.
pub const PLATFORM_PACKAGES_KEY: &str = "platform-packages";

/// `extra` key holding ad-hoc download URLs of a `platform-package` record.
pub const PLATFORM_URLS_KEY: &str = "platform-urls";

/// Package type handled by the install-time resolver.
pub const PLATFORM_PACKAGE_TYPE: &str = "platform-package";

/// Platform key to a URL or a list of URLs, in declaration order.
pub type RawPlatforms = Map<String, Value>;

/// A package as the host package manager describes it: the root manifest or
/// an entry of the installed-packages file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PackageRecord {
    #[serde(default)]
    pub name: String,

    /// Pretty version (`version` on disk)
    #[serde(default, rename = "version", skip_serializing_if = "Option::is_none")]
    pub pretty_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_normalized: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<DistRecord>,

    #[serde(default, rename = "install-path", skip_serializing_if = "Option::is_none")]
    pub install_path: Option<String>,

    /// Set for the top-level manifest, never read from disk
    #[serde(skip)]
    pub is_root: bool,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, pretty_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pretty_version: Some(pretty_version.into()),
            ..Default::default()
        }
    }

    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_root: true,
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        if let Value::Object(map) = extra {
            self.extra = map;
        }
        self
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    pub fn pretty_version(&self) -> &str {
        self.pretty_version.as_deref().unwrap_or_default()
    }

    /// Normalized version, preferring the stored `version_normalized`.
    pub fn version(&self) -> Result<String, ConfigError> {
        match &self.version_normalized {
            Some(version) => Ok(version.clone()),
            None => normalize_version(self.pretty_version()),
        }
    }

    /// The `platform-packages` declarations, in declaration order.
    pub fn platform_packages(&self) -> Result<Vec<(String, PlatformPackageConfig)>, ConfigError> {
        let declarations = match self.extra.get(PLATFORM_PACKAGES_KEY) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ConfigError::MalformedPackageConfig {
                    package: self.name.clone(),
                    reason: format!("'{}' must be a mapping", PLATFORM_PACKAGES_KEY),
                });
            }
        };

        declarations
            .iter()
            .map(|(name, value)| {
                let config = PlatformPackageConfig::deserialize(value).map_err(|e| {
                    ConfigError::MalformedPackageConfig {
                        package: name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok((name.clone(), config))
            })
            .collect()
    }

    /// The ad-hoc `platform-urls` of this record, if declared as a mapping.
    pub fn platform_urls(&self) -> Option<&RawPlatforms> {
        self.extra.get(PLATFORM_URLS_KEY).and_then(Value::as_object)
    }
}

/// Distribution info of an installed record. Types are kept as written,
/// since regular packages use kinds outside [`ArchiveKind`].
///
/// [`ArchiveKind`]: crate::archive::ArchiveKind
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DistRecord {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One entry of `extra.platform-packages`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PlatformPackageConfig {
    #[serde(default)]
    pub version: Option<String>,

    /// Declared archive kind, overrides classification
    #[serde(default, rename = "type")]
    pub archive_type: Option<String>,

    /// Left loosely typed so shape errors are reported per platform
    #[serde(default)]
    pub platforms: Option<Value>,
}

/// Normalize one platform value to its URL list.
pub(crate) fn urls_of(platform: &str, value: &Value) -> Result<Vec<String>, ConfigError> {
    let entry_error = || ConfigError::InvalidUrlEntry {
        platform: platform.to_string(),
    };

    match value {
        Value::String(url) => Ok(vec![url.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(entry_error))
            .collect(),
        _ => Err(entry_error()),
    }
}
