use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

const DEFAULT_MANIFEST: &str = "composer.json";
const DEFAULT_VENDOR_DIR: &str = "vendor";

/// Root manifest path: explicit, else `$COMPOSER`, else `composer.json`.
#[tracing::instrument(skip(runtime))]
pub fn manifest_path<R: Runtime>(runtime: &R, explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => runtime
            .env_var("COMPOSER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MANIFEST)),
    };
    absolute(runtime, path)
}

/// Installed packages file: explicit, else
/// `$COMPOSER_VENDOR_DIR/composer/installed.json` next to the manifest.
#[tracing::instrument(skip(runtime))]
pub fn installed_path<R: Runtime>(
    runtime: &R,
    explicit: Option<PathBuf>,
    manifest: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return absolute(runtime, path);
    }

    let vendor_dir = runtime
        .env_var("COMPOSER_VENDOR_DIR")
        .unwrap_or_else(|_| DEFAULT_VENDOR_DIR.to_string());
    let project_dir = manifest.parent().unwrap_or_else(|| Path::new(""));
    let path = project_dir
        .join(vendor_dir)
        .join("composer")
        .join("installed.json");

    debug!("Using installed packages file {:?}", path);
    absolute(runtime, path)
}

fn absolute<R: Runtime>(runtime: &R, path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(runtime.current_dir()?.join(path))
    }
}
