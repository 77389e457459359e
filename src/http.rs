//! HTTP page fetcher for the blogsync crate
//!
//! The ingestor never talks to reqwest directly. It goes through the
//! [`PageFetcher`] trait so runs can be driven by an in-memory fetcher in tests.

use crate::error::Error as CrateError;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A fetched page with its final status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// HTTP status code of the response
    pub status: u16,

    /// Response body decoded as text
    pub body: String,
}

/// Error type for page fetches
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport level failure (DNS, connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => CrateError::Http(e),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}

/// Source of raw pages for the listing and the articles
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page as text. Non-2xx responses are returned as [`FetchError::Status`].
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// Fetch raw bytes, used for images.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed [`PageFetcher`]
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: ReqwestClient,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout and user agent
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(format!("blogsync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("Sending GET request to {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {} failed with status {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.get(url).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/author/jane")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/author/jane", server.url());
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.url, url);
        assert!(page.body.contains("hello"));

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_observable() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.url())).await;

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected status error, got {:?}", other),
        }

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/cover.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body([0xFFu8, 0xD8, 0xFF])
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let bytes = fetcher
            .fetch_bytes(&format!("{}/cover.jpg", server.url()))
            .await
            .unwrap();

        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(1)).unwrap();
        // Nothing listens on the discard port
        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }
}
