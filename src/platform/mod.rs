//! Platform detection and matching
//!
//! This module captures the current platform (OS and architecture),
//! normalizes architecture aliases, and selects the most specific download
//! URL declared for that platform.

mod arch;
mod descriptor;
mod matcher;
mod url_map;

pub use arch::normalize_arch;
pub use descriptor::{HostPlatformDetector, PlatformDescriptor, PlatformDetector};
pub use matcher::{PlatformKey, Specificity, platform_matches, select_best};
pub use url_map::PlatformUrlMap;

#[cfg(test)]
pub use descriptor::MockPlatformDetector;
