use anyhow::{Result, bail};
use log::warn;

use super::config::Config;
use crate::{
    archive::ContentTypeProbe,
    install::{DistResolver, ResolvedDist},
    package::InstalledRepository,
    runtime::Runtime,
};

/// Resolve the download of one installed `platform-package` record.
pub async fn resolve_installed_dist<R: Runtime, P: ContentTypeProbe>(
    config: Config<R, P>,
    name: &str,
) -> Result<Option<ResolvedDist>> {
    let installed = InstalledRepository::load(&config.runtime, &config.installed_path)?;

    let Some(record) = installed.find(name) else {
        bail!("Package {} is not installed.", name);
    };
    if !DistResolver::<P>::supports(record) {
        bail!(
            "Package {} is of type {}, not a platform-package.",
            record.name,
            record.package_type.as_deref().unwrap_or("library")
        );
    }

    let resolver = DistResolver::new(config.platform, config.classifier);
    Ok(resolver.resolve_dist(record).await)
}

/// Print `<url> <kind>` for an installed record.
#[tracing::instrument(skip(config))]
pub async fn dist<R: Runtime, P: ContentTypeProbe>(config: Config<R, P>, name: &str) -> Result<()> {
    match resolve_installed_dist(config, name).await? {
        Some(dist) => println!("{} {}", dist.url, dist.kind),
        None => warn!("{}: keeping the recorded dist", name),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveClassifier, ArchiveKind, NoProbe};
    use crate::platform::PlatformDescriptor;
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    const INSTALLED: &str = r#"[
        {
            "name": "acme/tool--cli",
            "version": "2.1.0",
            "type": "platform-package",
            "extra": {
                "platform-urls": {
                    "linux-x86_64": "https://example.com/cli-{version}-linux-x64.tgz",
                    "win": "https://example.com/cli-{version}-win.zip"
                }
            }
        },
        { "name": "psr/log", "version": "3.0.0", "type": "library" }
    ]"#;

    fn config(os: &str, arch: &str) -> Config<MockRuntime, NoProbe> {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(INSTALLED.to_string()));

        Config {
            runtime,
            platform: PlatformDescriptor::new(os, arch),
            classifier: ArchiveClassifier::new(NoProbe),
            manifest_path: PathBuf::from("/project/composer.json"),
            installed_path: PathBuf::from("/project/vendor/composer/installed.json"),
        }
    }

    #[tokio::test]
    async fn test_resolve_installed_dist() {
        let dist = resolve_installed_dist(config("windows", "x86_64"), "acme/tool--cli")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dist.url, "https://example.com/cli-2.1.0-win.zip");
        assert_eq!(dist.kind, ArchiveKind::Zip);
    }

    #[tokio::test]
    async fn test_resolve_installed_dist_no_match_is_not_an_error() {
        let dist = resolve_installed_dist(config("darwin", "arm64"), "acme/tool--cli")
            .await
            .unwrap();
        assert_eq!(dist, None);
    }

    #[tokio::test]
    async fn test_resolve_installed_dist_unknown_package() {
        let err = resolve_installed_dist(config("linux", "x86_64"), "acme/missing")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is not installed"));
    }

    #[tokio::test]
    async fn test_resolve_installed_dist_wrong_type() {
        let err = resolve_installed_dist(config("linux", "x86_64"), "psr/log")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a platform-package"));
    }
}
