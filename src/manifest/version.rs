//! Version string normalization.
//!
//! Turns a human-readable ("pretty") version into the padded, comparable
//! form the host package manager stores next to it. Constraints and ranges
//! are not handled here.

use crate::error::ConfigError;

/// Version synthesized for root packages that declare none.
pub const DEV_VERSION: &str = "dev-master";

/// Stands in for wildcard components of branch versions.
const BRANCH_COMPONENT: &str = "9999999";

const STABILITIES: &[(&str, &str)] = &[
    ("stable", ""),
    ("alpha", "alpha"),
    ("beta", "beta"),
    ("patch", "patch"),
    ("rc", "RC"),
    ("pl", "patch"),
    ("dev", "dev"),
    ("a", "alpha"),
    ("b", "beta"),
    ("p", "patch"),
];

/// Normalize a pretty version.
///
/// - `dev-<branch>` passes through; `master`, `trunk` and `default` become
///   `dev-<name>`
/// - `v1.2` becomes `1.2.0.0`, up to four numeric components
/// - stability suffixes are canonicalized: `1.0-b2` becomes `1.0.0.0-beta2`
/// - `1.2.x-dev` becomes `1.2.9999999.9999999-dev`
/// - `+build` metadata is dropped
pub fn normalize_version(pretty: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidVersion(pretty.to_string());
    let trimmed = pretty.trim();

    if trimmed.len() > 4
        && trimmed
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("dev-"))
    {
        return Ok(format!("dev-{}", &trimmed[4..]));
    }

    let lower = trimmed.to_lowercase();
    if matches!(lower.as_str(), "master" | "trunk" | "default") {
        return Ok(format!("dev-{}", lower));
    }

    let core = lower.split('+').next().unwrap_or_default();
    let core = match core.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => core,
    };

    if let Some(branch) = normalize_branch(core) {
        return Ok(branch);
    }

    let numeric_end = core
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(core.len());
    let (numeric, suffix) = core.split_at(numeric_end);

    let mut components: Vec<&str> = numeric.split('.').collect();
    if components.len() > 4
        || components
            .iter()
            .any(|c| c.is_empty() || !c.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }
    components.resize(4, "0");
    let numeric = components.join(".");

    if suffix.is_empty() {
        return Ok(numeric);
    }

    let stability = normalize_stability(suffix).ok_or_else(invalid)?;
    if stability.is_empty() {
        Ok(numeric)
    } else {
        Ok(format!("{}-{}", numeric, stability))
    }
}

/// `1.x-dev`, `1.2.*-dev` and friends.
fn normalize_branch(version: &str) -> Option<String> {
    let base = version.strip_suffix("-dev")?;
    let parts: Vec<&str> = base.split('.').collect();
    if parts.len() > 4 {
        return None;
    }

    let wildcard = |p: &str| p == "x" || p == "*";
    let first_wildcard = parts.iter().position(|p| wildcard(p))?;
    let (numbers, wildcards) = parts.split_at(first_wildcard);
    if numbers.is_empty()
        || !numbers
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        || !wildcards.iter().all(|p| wildcard(p))
    {
        return None;
    }

    let mut components: Vec<&str> = numbers.to_vec();
    components.resize(4, BRANCH_COMPONENT);
    Some(format!("{}-dev", components.join(".")))
}

/// `-beta.2` -> `beta2`, `rc1` -> `RC1`, `-stable` -> ``
fn normalize_stability(suffix: &str) -> Option<String> {
    let suffix = suffix.strip_prefix(['-', '.', '_']).unwrap_or(suffix);

    let (rest, canonical) = STABILITIES
        .iter()
        .find_map(|(name, canonical)| suffix.strip_prefix(name).map(|rest| (rest, *canonical)))?;

    let number = rest.strip_prefix(['-', '.']).unwrap_or(rest);
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if canonical.is_empty() && !number.is_empty() {
        return None;
    }

    Some(format!("{}{}", canonical, number))
}
