//! Error types for platform package resolution.

use thiserror::Error;

/// A platform package configuration could not be validated.
///
/// Always fatal to the validation call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The `platforms` mapping is absent, not a mapping, or empty
    #[error("Invalid or missing platforms for library: {package}")]
    MissingPlatforms { package: String },

    /// A `platform-packages` entry that does not have the expected shape
    #[error("Malformed configuration for platform package {package}: {reason}")]
    MalformedPackageConfig { package: String, reason: String },

    /// Parent name is not `vendor/name`, or the suffix has illegal characters
    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    /// A URL did not parse as an absolute URL after `{version}` substitution
    #[error("Invalid URL: {url} ({reason})")]
    InvalidUrl { url: String, reason: String },

    /// A platform value that is neither a string nor a list of strings
    #[error("Invalid URL entry for platform '{platform}': expected a string or a list of strings")]
    InvalidUrlEntry { platform: String },

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Unsupported archive type: {0}")]
    UnsupportedArchiveType(String),
}

/// No declared platform key matches the current platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No valid url could be found for platform {platform}")]
pub struct NoMatchError {
    /// The `os-arch` of the descriptor that failed to match
    pub platform: String,
}
