//! Thin HTTP client wrapper for HEAD metadata requests.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a HEAD request and returns the final response headers.
    ///
    /// Redirects are followed. A non-success status is an error, as is
    /// exceeding `timeout`.
    #[tracing::instrument(skip(self))]
    pub async fn head(&self, url: &str, timeout: Duration) -> Result<HeaderMap> {
        debug!("HEAD {}...", url);

        let response = self
            .client
            .head(url)
            .timeout(timeout)
            .send()
            .await
            .context("Failed to send HEAD request")?;

        // Headers of an error status are not trusted for classification
        let response = response
            .error_for_status()
            .context("HEAD request returned an error status")?;

        Ok(response.headers().clone())
    }

    /// Returns the `Content-Type` of `url`, or `None` if the header is absent.
    pub async fn content_type(&self, url: &str, timeout: Duration) -> Result<Option<String>> {
        let headers = self.head(url, timeout).await?;
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!("Content-Type of {}: {:?}", url, content_type);
        Ok(content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_head_returns_content_type() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("HEAD", "/download")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let content_type = client
            .content_type(&format!("{}/download", url), TIMEOUT)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(content_type.as_deref(), Some("application/zip"));
    }

    #[tokio::test]
    async fn test_head_not_found_is_error() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("HEAD", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result = client
            .content_type(&format!("{}/missing", url), TIMEOUT)
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_head_follows_redirects() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let redirect = server
            .mock("HEAD", "/latest")
            .with_status(302)
            .with_header("location", &format!("{}/files/tool", url))
            .create_async()
            .await;
        let target = server
            .mock("HEAD", "/files/tool")
            .with_status(200)
            .with_header("content-type", "application/x-gzip")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let content_type = client
            .content_type(&format!("{}/latest", url), TIMEOUT)
            .await
            .unwrap();

        redirect.assert_async().await;
        target.assert_async().await;
        assert_eq!(content_type.as_deref(), Some("application/x-gzip"));
    }
}
