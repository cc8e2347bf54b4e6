use log::{debug, warn};
use reqwest::Url;

use super::ArchiveKind;
use super::probe::ContentTypeProbe;

/// Infers an [`ArchiveKind`] for a URL.
///
/// Extension first, then the probe, then [`ArchiveKind::Zip`]. Classification
/// never fails: probe errors are logged and treated as inconclusive.
pub struct ArchiveClassifier<P: ContentTypeProbe> {
    probe: P,
}

impl<P: ContentTypeProbe> ArchiveClassifier<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    #[tracing::instrument(skip(self))]
    pub async fn classify(&self, url: &str) -> ArchiveKind {
        if let Some(kind) = url_extension(url)
            .as_deref()
            .and_then(ArchiveKind::from_extension)
        {
            debug!("{} classified as {} by extension", url, kind);
            return kind;
        }

        match self.probe.content_type(url).await {
            Ok(Some(content_type)) => {
                if let Some(kind) = ArchiveKind::from_content_type(&content_type) {
                    debug!("{} classified as {} by content type {}", url, kind, content_type);
                    return kind;
                }
                debug!("Unrecognized content type {} for {}", content_type, url);
            }
            Ok(None) => debug!("No content type reported for {}", url),
            Err(e) => warn!("Could not probe {} ({:#}), assuming zip", url, e),
        }

        ArchiveKind::default()
    }
}

/// Lower-case extension of the last path segment of `url`.
fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let file_name = parsed.path().trim_end_matches('/').rsplit('/').next()?;
    let (_, extension) = file_name.rsplit_once('.')?;
    (!extension.is_empty()).then(|| extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{MockContentTypeProbe, NoProbe};

    /// A probe that fails the test if it is ever consulted
    fn unused_probe() -> MockContentTypeProbe {
        let mut probe = MockContentTypeProbe::new();
        probe.expect_content_type().never();
        probe
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://x/a.tar.gz").as_deref(), Some("gz"));
        assert_eq!(url_extension("https://x/dir.v1/TOOL.ZIP?x=1#f").as_deref(), Some("zip"));
        assert_eq!(url_extension("https://x/dir.v1/tool"), None);
        assert_eq!(url_extension("https://x/"), None);
        assert_eq!(url_extension("not a url"), None);
    }

    #[tokio::test]
    async fn test_classify_by_extension_skips_probe() {
        let classifier = ArchiveClassifier::new(unused_probe());

        assert_eq!(classifier.classify("https://x/a.tar.gz").await, ArchiveKind::Tar);
        assert_eq!(classifier.classify("https://x/a.zip").await, ArchiveKind::Zip);
        assert_eq!(classifier.classify("https://x/a.7z").await, ArchiveKind::SevenZip);
        assert_eq!(classifier.classify("https://x/a.RAR").await, ArchiveKind::Rar);
        assert_eq!(classifier.classify("https://x/a.tbz2").await, ArchiveKind::Tar);
    }

    #[tokio::test]
    async fn test_classify_uses_content_type() {
        let mut probe = MockContentTypeProbe::new();
        probe
            .expect_content_type()
            .withf(|url| url == "https://x/download")
            .times(1)
            .returning(|_| Ok(Some("application/x-tar".to_string())));

        let classifier = ArchiveClassifier::new(probe);
        assert_eq!(classifier.classify("https://x/download").await, ArchiveKind::Tar);
    }

    #[tokio::test]
    async fn test_classify_unknown_extension_falls_through_to_probe() {
        let mut probe = MockContentTypeProbe::new();
        probe
            .expect_content_type()
            .times(1)
            .returning(|_| Ok(Some("application/gzip".to_string())));

        let classifier = ArchiveClassifier::new(probe);
        assert_eq!(classifier.classify("https://x/tool.bin").await, ArchiveKind::Tar);
    }

    #[tokio::test]
    async fn test_classify_probe_failure_defaults_to_zip() {
        let mut probe = MockContentTypeProbe::new();
        probe
            .expect_content_type()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let classifier = ArchiveClassifier::new(probe);
        assert_eq!(classifier.classify("https://x/a").await, ArchiveKind::Zip);
    }

    #[tokio::test]
    async fn test_classify_unrecognized_content_type_defaults_to_zip() {
        let mut probe = MockContentTypeProbe::new();
        probe
            .expect_content_type()
            .returning(|_| Ok(Some("text/html; charset=utf-8".to_string())));

        let classifier = ArchiveClassifier::new(probe);
        assert_eq!(classifier.classify("https://x/a").await, ArchiveKind::Zip);
    }

    #[tokio::test]
    async fn test_classify_without_probe_defaults_to_zip() {
        let classifier = ArchiveClassifier::new(NoProbe);
        assert_eq!(classifier.classify("https://x/a").await, ArchiveKind::Zip);
    }

    #[tokio::test]
    async fn test_classify_with_http_probe() {
        use crate::archive::HttpProbe;
        use crate::http::HttpClient;
        use std::time::Duration;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/releases/tool")
            .with_status(200)
            .with_header("content-type", "application/x-zip-compressed")
            .create_async()
            .await;

        let probe = HttpProbe::new(
            HttpClient::new(reqwest::Client::new()),
            Duration::from_secs(5),
        );
        let classifier = ArchiveClassifier::new(probe);
        let kind = classifier
            .classify(&format!("{}/releases/tool", server.url()))
            .await;

        mock.assert_async().await;
        assert_eq!(kind, ArchiveKind::Zip);
    }

    #[tokio::test]
    async fn test_classify_with_http_probe_server_error() {
        use crate::archive::HttpProbe;
        use crate::http::HttpClient;
        use std::time::Duration;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/releases/tool")
            .with_status(500)
            .create_async()
            .await;

        let probe = HttpProbe::new(
            HttpClient::new(reqwest::Client::new()),
            Duration::from_secs(5),
        );
        let classifier = ArchiveClassifier::new(probe);
        let kind = classifier
            .classify(&format!("{}/releases/tool", server.url()))
            .await;

        mock.assert_async().await;
        assert_eq!(kind, ArchiveKind::Zip);
    }
}
