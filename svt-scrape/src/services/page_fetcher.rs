//! HTTP page fetching
//!
//! `PageFetcher` is the transport seam of the pipeline. `HttpFetcher` is the
//! reqwest-backed implementation used by the binary; tests substitute an
//! in-memory fetcher.

use crate::error::{ScrapeError, ScrapeResult};
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("svt-scrape/", env!("CARGO_PKG_VERSION"));

/// Raw response of a page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, `ScrapeError::Status` otherwise
    pub fn into_success_body(self) -> ScrapeResult<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ScrapeError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }
}

/// Blocking-in-spirit GET: one request, fully read, no retries
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ScrapeResult<FetchedPage>;
}

/// Build the shared HTTP client
///
/// No timeout is set unless one is configured; the transport default applies.
pub fn build_http_client(timeout: Option<Duration>) -> ScrapeResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ScrapeError::Network(format!("Failed to create HTTP client: {}", e)))
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ScrapeResult<FetchedPage> {
        tracing::debug!(url = %url, "Fetching page");

        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(url = %url, status, bytes = body.len(), "Page fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
