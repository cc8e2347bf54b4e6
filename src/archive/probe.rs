use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::http::HttpClient;

/// Network metadata lookup used when a URL has no recognizable extension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentTypeProbe: Send + Sync {
    /// The `Content-Type` reported for `url`, if any.
    async fn content_type(&self, url: &str) -> Result<Option<String>>;
}

#[async_trait]
impl<T: ContentTypeProbe + ?Sized> ContentTypeProbe for Box<T> {
    async fn content_type(&self, url: &str) -> Result<Option<String>> {
        (**self).content_type(url).await
    }
}

/// Probes with an HTTP HEAD request bounded by `timeout`.
pub struct HttpProbe {
    client: HttpClient,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: HttpClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ContentTypeProbe for HttpProbe {
    async fn content_type(&self, url: &str) -> Result<Option<String>> {
        self.client.content_type(url, self.timeout).await
    }
}

/// Never touches the network; every probe is inconclusive.
pub struct NoProbe;

#[async_trait]
impl ContentTypeProbe for NoProbe {
    async fn content_type(&self, _url: &str) -> Result<Option<String>> {
        Ok(None)
    }
}
