//! Package manifests and platform package declarations
//!
//! Reads the host package manager's package records, normalizes versions,
//! and validates declared platform URLs into a [`PlatformUrlMap`].
//!
//! [`PlatformUrlMap`]: crate::platform::PlatformUrlMap

mod record;
mod validate;
mod version;

pub use record::{
    DistRecord, PLATFORM_PACKAGE_TYPE, PLATFORM_PACKAGES_KEY, PLATFORM_URLS_KEY, PackageRecord,
    PlatformPackageConfig, RawPlatforms,
};
pub use validate::{
    VERSION_PLACEHOLDER, ValidatedPackageConfig, check_url, resolve_platform_urls,
    substitute_version, validate_package_config, validate_platforms,
};
pub use version::{DEV_VERSION, normalize_version};
