//! Matching platform keys against a [`PlatformDescriptor`] and picking the
//! most specific URL.

use log::debug;

use super::arch::normalize_arch;
use super::descriptor::PlatformDescriptor;
use super::url_map::PlatformUrlMap;
use crate::error::NoMatchError;

/// Canonical OS families and the host spellings they accept.
const OS_ALIASES: &[(&str, &[&str])] = &[
    ("win", &["windows", "win32", "win64"]),
    ("darwin", &["macos", "mac", "darwin"]),
    ("linux", &["linux", "gnu/linux"]),
    ("raspberrypi", &["raspbian", "raspberry pi"]),
];

/// How narrowly a key targets a platform. Sorts most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    /// `<os>-<arch>`
    Architecture,
    /// `<os>`
    OperatingSystem,
    /// `all`
    CatchAll,
}

/// A parsed platform key: `all`, `<os>` or `<os>-<arch>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformKey {
    All,
    Specific { os: String, arch: Option<String> },
}

impl PlatformKey {
    /// Parse a key case-insensitively. Segments after the second `-` are ignored.
    pub fn parse(key: &str) -> Self {
        let key = key.to_lowercase();
        if key == "all" {
            return PlatformKey::All;
        }

        let mut parts = key.split('-');
        let os = parts.next().unwrap_or_default().to_string();
        let arch = parts.next().map(str::to_string);
        PlatformKey::Specific { os, arch }
    }

    pub fn matches(&self, current: &PlatformDescriptor) -> bool {
        match self {
            PlatformKey::All => true,
            PlatformKey::Specific { os, arch } => {
                let os_match = os_matches(os, &current.os);
                let arch_match = arch
                    .as_deref()
                    .is_none_or(|arch| normalize_arch(arch) == current.arch);
                os_match && arch_match
            }
        }
    }

    pub fn specificity(&self) -> Specificity {
        match self {
            PlatformKey::All => Specificity::CatchAll,
            PlatformKey::Specific { arch: Some(_), .. } => Specificity::Architecture,
            PlatformKey::Specific { arch: None, .. } => Specificity::OperatingSystem,
        }
    }
}

fn os_matches(defined: &str, current: &str) -> bool {
    if defined == current {
        return true;
    }

    OS_ALIASES
        .iter()
        .any(|(family, spellings)| *family == defined && spellings.contains(&current))
}

/// Check whether a declared platform key applies to `current`.
pub fn platform_matches(defined: &str, current: &PlatformDescriptor) -> bool {
    PlatformKey::parse(defined).matches(current)
}

/// Select the preferred URL of the most specific key matching `current`.
///
/// Architecture-qualified keys beat bare OS keys, which beat `all`. Keys of
/// equal specificity keep their declaration order. Keys without any URL are
/// not candidates.
pub fn select_best<'a>(
    urls: &'a PlatformUrlMap,
    current: &PlatformDescriptor,
) -> Result<&'a str, NoMatchError> {
    let mut candidates: Vec<(Specificity, &str, &'a [String])> = urls
        .iter()
        .filter(|(_, candidates)| !candidates.is_empty())
        .filter_map(|(key, candidates)| {
            let parsed = PlatformKey::parse(key);
            parsed
                .matches(current)
                .then(|| (parsed.specificity(), key, candidates))
        })
        .collect();

    // Stable: equally specific keys stay in declaration order
    candidates.sort_by_key(|(specificity, _, _)| *specificity);

    let (_, key, candidates) = candidates.into_iter().next().ok_or_else(|| NoMatchError {
        platform: current.to_string(),
    })?;

    debug!("Platform key '{}' selected for {}", key, current);
    Ok(candidates[0].as_str())
}
