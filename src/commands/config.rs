use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use super::paths::{installed_path, manifest_path};
use crate::{
    archive::{ArchiveClassifier, ContentTypeProbe, HttpProbe, NoProbe},
    http::HttpClient,
    platform::{PlatformDescriptor, PlatformDetector},
    runtime::Runtime,
};

/// Default bound on the content-type probe.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// User-supplied settings, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub probe_timeout: Option<Duration>,
    pub no_probe: bool,
    pub manifest: Option<PathBuf>,
    pub installed: Option<PathBuf>,
}

pub struct Config<R: Runtime, P: ContentTypeProbe> {
    pub runtime: R,
    pub platform: PlatformDescriptor,
    pub classifier: ArchiveClassifier<P>,
    pub manifest_path: PathBuf,
    pub installed_path: PathBuf,
}

impl<R: Runtime> Config<R, Box<dyn ContentTypeProbe>> {
    pub fn new<D: PlatformDetector>(runtime: R, detector: &D, options: Options) -> Result<Self> {
        let platform = detector
            .detect()
            .with_overrides(options.os.as_deref(), options.arch.as_deref());
        debug!("Current platform: {} ({})", platform, platform.raw);

        let probe: Box<dyn ContentTypeProbe> = if options.no_probe {
            Box::new(NoProbe)
        } else {
            let timeout = options
                .probe_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS));
            let client = Client::builder()
                .user_agent(concat!("platpkg/", env!("PLATPKG_VERSION")))
                .build()
                .context("Failed to build HTTP client")?;
            Box::new(HttpProbe::new(HttpClient::new(client), timeout))
        };

        let manifest_path = manifest_path(&runtime, options.manifest)?;
        let installed_path = installed_path(&runtime, options.installed, &manifest_path)?;

        Ok(Self {
            runtime,
            platform,
            classifier: ArchiveClassifier::new(probe),
            manifest_path,
            installed_path,
        })
    }
}
