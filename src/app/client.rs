//! HTTP fetch operations for dataset files and the source page
//!
//! This module defines the `Fetcher` seam the coordinator downloads through
//! and its production implementation, `TlcClient`. The client performs plain
//! GET requests with a bounded timeout and classifies every transport
//! failure into a typed `DownloadError`; it never retries (at most one
//! attempt per call) and knows nothing about storage.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult};

use super::models::SourceUrl;

/// Retrieval of raw bytes for one URL
///
/// The coordinator is generic over this trait so tests can inject fetchers
/// with scripted failures without touching the network.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetch the full content of one URL
    ///
    /// At most one attempt is made per call. Transport failures, timeouts,
    /// and non-success statuses are returned as classified `DownloadError`
    /// values, never propagated as panics or raw transport errors.
    fn fetch(&self, url: &SourceUrl) -> impl Future<Output = DownloadResult<Vec<u8>>> + Send;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout, covering the full body read
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: http::POOL_IDLE_TIMEOUT,
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> DownloadResult<Client> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_per_host)
            .user_agent(http::USER_AGENT)
            .build()
            .map_err(DownloadError::Http)
    }
}

/// HTTP client for the TLC data host and landing page
#[derive(Debug, Clone)]
pub struct TlcClient {
    client: Client,
    request_timeout: Duration,
}

impl TlcClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> DownloadResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    /// Create a client with default configuration
    pub fn new_default() -> DownloadResult<Self> {
        Self::new(ClientConfig::default())
    }

    /// Fetch the HTML content of a web page as text
    ///
    /// Used by discovery; same classification rules as file fetches.
    pub async fn get_page(&self, url: &Url) -> DownloadResult<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::ServerError {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!("Fetched page: {}", url);
        Ok(text)
    }

    /// Map a reqwest error onto the download error taxonomy
    fn classify(&self, error: reqwest::Error) -> DownloadError {
        if error.is_timeout() {
            DownloadError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }
        } else if error.is_connect() {
            DownloadError::Connect {
                message: error.to_string(),
            }
        } else {
            DownloadError::Http(error)
        }
    }
}

impl Fetcher for TlcClient {
    async fn fetch(&self, url: &SourceUrl) -> DownloadResult<Vec<u8>> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::ServerError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(bytes.to_vec())
    }
}
