//! Forecast feed fetchers
//!
//! The resolver depends on the [`ForecastFetcher`] capability only; the HTTP
//! and local-file implementations here are interchangeable with each other
//! and with test doubles.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Default forecast feed location
pub const DEFAULT_FEED_URL: &str = "https://www.yr.no/place/Estonia/Tartumaa/Tartu/forecast.xml";

/// Errors that can occur while retrieving the forecast feed
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed source answered with a non-success status
    #[error("forecast source returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// A local feed file could not be read
    #[error("failed to read forecast file: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability for retrieving raw forecast feed text
///
/// No retries and no timeout configuration; a failed fetch surfaces as a
/// [`FetchError`] to the caller.
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    /// Retrieves the raw feed text.
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// HTTP fetcher for the remote forecast feed
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    /// Creates a fetcher for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Creates a fetcher for the default feed location.
    pub fn with_default_url() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }

    /// The feed URL this fetcher targets.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_default_url()
    }
}

#[async_trait]
impl ForecastFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "Fetching forecast feed");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// Fetcher that reads the feed from a local XML file
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    /// Creates a fetcher reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastFetcher for FileFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "Reading forecast feed from file");
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}
