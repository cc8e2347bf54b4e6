//! Platform package resolution
//!
//! Turns the `platform-packages` declarations of a package into resolved,
//! installable package descriptors, and compares them with what is already
//! installed.

mod installed;
mod plan;
mod platform_package;

pub use installed::InstalledRepository;
pub use plan::{Operation, plan};
pub use platform_package::{
    Dist, NAME_SEPARATOR, PlatformPackage, collect_platform_packages, full_package_name,
    split_platform_package_name,
};
