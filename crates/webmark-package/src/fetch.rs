//! Downloading image bytes.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::bundle::PackageOptions;
use crate::error::{FetchError, PackageError};

/// Source of image bytes, one call per resolved URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Fetches images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: &PackageOptions) -> Result<Self, PackageError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(PackageError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        debug!(%url, "fetching image");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&PackageOptions::default()).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:9/missing.png").await;
        assert!(matches!(err, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&PackageOptions::default()).unwrap();
        assert!(fetcher.fetch("not a url").await.is_err());
    }
}
