use serde::Serialize;
use std::fmt;

use super::arch::normalize_arch;

/// The execution environment as a normalized (OS, architecture) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformDescriptor {
    /// Lower-case OS name as reported by the host (`linux`, `darwin`, `windows`)
    pub os: String,
    /// Canonical architecture token, see [`normalize_arch`]
    pub arch: String,
    /// Full uname-style string, informational only
    pub raw: String,
}

impl PlatformDescriptor {
    /// Build a descriptor from raw OS and architecture names.
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: os.to_lowercase(),
            arch: normalize_arch(arch),
            raw: format!("{} {}", os, arch),
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Replace the OS and/or architecture, keeping the rest.
    pub fn with_overrides(self, os: Option<&str>, arch: Option<&str>) -> Self {
        if os.is_none() && arch.is_none() {
            return self;
        }
        let os = os.map(str::to_lowercase).unwrap_or(self.os);
        let arch = arch.map(normalize_arch).unwrap_or(self.arch);
        Self {
            raw: format!("{} {}", os, arch),
            os,
            arch,
        }
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Source of the current platform (mockable for tests)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> PlatformDescriptor;
}

/// Reads the host's uname information.
pub struct HostPlatformDetector;

impl PlatformDetector for HostPlatformDetector {
    #[tracing::instrument(skip(self))]
    fn detect(&self) -> PlatformDescriptor {
        host_descriptor()
    }
}

#[cfg(unix)]
fn host_descriptor() -> PlatformDescriptor {
    match nix::sys::utsname::uname() {
        Ok(uts) => {
            let sysname = uts.sysname().to_string_lossy().into_owned();
            let machine = uts.machine().to_string_lossy().into_owned();
            let raw = format!(
                "{} {} {} {} {}",
                sysname,
                uts.nodename().to_string_lossy(),
                uts.release().to_string_lossy(),
                uts.version().to_string_lossy(),
                machine
            );
            PlatformDescriptor::new(&sysname, &machine).with_raw(raw)
        }
        Err(e) => {
            log::debug!("uname failed ({}), using compile-time platform", e);
            compile_time_descriptor()
        }
    }
}

#[cfg(not(unix))]
fn host_descriptor() -> PlatformDescriptor {
    compile_time_descriptor()
}

fn compile_time_descriptor() -> PlatformDescriptor {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    PlatformDescriptor::new(os, std::env::consts::ARCH)
}
