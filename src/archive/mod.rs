//! Archive kind classification
//!
//! Decides which extraction strategy a downloaded artifact needs, from the
//! URL's file extension or, failing that, a `Content-Type` probe.

mod classifier;
mod probe;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub use classifier::ArchiveClassifier;
pub use probe::{ContentTypeProbe, HttpProbe, NoProbe};

#[cfg(test)]
pub use probe::MockContentTypeProbe;

/// Container/compression format of a downloadable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArchiveKind {
    #[default]
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar")]
    Tar,
    #[serde(rename = "7z")]
    SevenZip,
    #[serde(rename = "rar")]
    Rar,
}

impl ArchiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar => "tar",
            ArchiveKind::SevenZip => "7z",
            ArchiveKind::Rar => "rar",
        }
    }

    /// Look up a lower-case file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "zip" => Some(ArchiveKind::Zip),
            "tar" | "gz" | "tgz" | "tbz2" | "bz2" => Some(ArchiveKind::Tar),
            "7z" => Some(ArchiveKind::SevenZip),
            "rar" => Some(ArchiveKind::Rar),
            "xz" | "lz" | "lzma" => Some(ArchiveKind::Tar),
            _ => None,
        }
    }

    /// Match a `Content-Type` header value by substring, case-insensitively.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        const CONTENT_TYPES: &[(&str, ArchiveKind)] = &[
            ("application/zip", ArchiveKind::Zip),
            ("application/x-zip-compressed", ArchiveKind::Zip),
            ("application/x-tar", ArchiveKind::Tar),
            ("application/x-gzip", ArchiveKind::Tar),
            ("application/gzip", ArchiveKind::Tar),
            ("application/x-bzip2", ArchiveKind::Tar),
        ];

        let content_type = content_type.to_lowercase();
        CONTENT_TYPES
            .iter()
            .find(|(needle, _)| content_type.contains(needle))
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zip" => Ok(ArchiveKind::Zip),
            "tar" => Ok(ArchiveKind::Tar),
            "7z" => Ok(ArchiveKind::SevenZip),
            "rar" => Ok(ArchiveKind::Rar),
            _ => Err(ConfigError::UnsupportedArchiveType(s.to_string())),
        }
    }
}
