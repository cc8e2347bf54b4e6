//! Commands that inspect the matcher and classifier directly.

use anyhow::Result;

use super::config::Config;
use crate::{
    archive::ContentTypeProbe,
    manifest::check_url,
    platform::{PlatformDescriptor, platform_matches},
    runtime::Runtime,
};

/// Print the platform descriptor in use.
pub fn platform<R: Runtime, P: ContentTypeProbe>(config: Config<R, P>) -> Result<()> {
    let PlatformDescriptor { os, arch, raw } = &config.platform;
    println!("os: {}", os);
    println!("arch: {}", arch);
    println!("raw: {}", raw);
    Ok(())
}

/// `KEY: yes|no` for each key.
pub fn match_lines(keys: &[String], current: &PlatformDescriptor) -> Vec<String> {
    keys.iter()
        .map(|key| {
            let verdict = if platform_matches(key, current) { "yes" } else { "no" };
            format!("{}: {}", key, verdict)
        })
        .collect()
}

pub fn match_keys<R: Runtime, P: ContentTypeProbe>(
    config: Config<R, P>,
    keys: &[String],
) -> Result<()> {
    for line in match_lines(keys, &config.platform) {
        println!("{}", line);
    }
    Ok(())
}

/// Print the archive kind of `url`.
#[tracing::instrument(skip(config))]
pub async fn classify<R: Runtime, P: ContentTypeProbe>(
    config: Config<R, P>,
    url: &str,
) -> Result<()> {
    check_url(url)?;
    println!("{}", config.classifier.classify(url).await);
    Ok(())
}
