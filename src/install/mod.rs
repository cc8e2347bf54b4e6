//! Install-time download URL resolution.
//!
//! Records of type `platform-package` may carry their own `platform-urls`.
//! Unlike package-level declarations, problems here never abort the
//! install: bad URLs are skipped and an unmatched platform leaves the
//! record's dist untouched.

use log::{debug, warn};

use crate::archive::{ArchiveClassifier, ArchiveKind, ContentTypeProbe};
use crate::manifest::{PLATFORM_PACKAGE_TYPE, PackageRecord, resolve_platform_urls};
use crate::platform::{PlatformDescriptor, select_best};

/// Download location chosen for one installed record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDist {
    pub url: String,
    pub kind: ArchiveKind,
}

pub struct DistResolver<P: ContentTypeProbe> {
    platform: PlatformDescriptor,
    classifier: ArchiveClassifier<P>,
}

impl<P: ContentTypeProbe> DistResolver<P> {
    pub fn new(platform: PlatformDescriptor, classifier: ArchiveClassifier<P>) -> Self {
        Self {
            platform,
            classifier,
        }
    }

    /// Whether this resolver applies to `record`.
    pub fn supports(record: &PackageRecord) -> bool {
        record.package_type.as_deref() == Some(PLATFORM_PACKAGE_TYPE)
    }

    /// Pick the dist URL of `record` for the current platform.
    ///
    /// Returns `None`, after logging why, when the record declares no
    /// usable `platform-urls` for this platform.
    #[tracing::instrument(skip(self, record), fields(package = %record.name))]
    pub async fn resolve_dist(&self, record: &PackageRecord) -> Option<ResolvedDist> {
        let raw = match record.platform_urls() {
            Some(raw) => raw,
            None => {
                debug!("{}: no platform-urls declared", record.name);
                return None;
            }
        };

        let urls = resolve_platform_urls(&record.name, raw, record.pretty_version());

        let url = match select_best(&urls, &self.platform) {
            Ok(url) => url.to_string(),
            Err(_) => {
                warn!("{}: No download URL found for current platform", record.name);
                return None;
            }
        };

        let kind = self.classifier.classify(&url).await;
        debug!("{}: dist {} ({})", record.name, url, kind);
        Some(ResolvedDist { url, kind })
    }
}
