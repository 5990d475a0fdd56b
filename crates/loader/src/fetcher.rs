//! The resource fetch seam.

use async_trait::async_trait;
use bytes::Bytes;
use common::{PageError, PageResult};
use std::collections::HashMap;

/// Fetches resource bytes by absolute URL.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> PageResult<Bytes>;
}

/// HTTP-backed fetcher.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> PageResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| PageError::network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Http(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|err| PageError::network(err.to_string()))
    }
}

/// In-memory fetcher for tests.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    resources: HashMap<String, Bytes>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.resources.insert(url.into(), data.into());
        self
    }
}

#[async_trait]
impl ResourceFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> PageResult<Bytes> {
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| PageError::not_found(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher() {
        let fetcher = StaticFetcher::new().with("https://cdn.example.com/a.js", "alert(1)");

        let data = fetcher.fetch("https://cdn.example.com/a.js").await.unwrap();
        assert_eq!(&data[..], b"alert(1)");

        let missing = fetcher.fetch("https://cdn.example.com/b.js").await;
        assert!(matches!(missing, Err(PageError::NotFound(_))));
    }
}
