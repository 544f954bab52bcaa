//! Error types for svt-scrape
//!
//! Every variant is recoverable at some scope of the pipeline: entries are
//! skipped, lookups fall back, items are abandoned. Only construction errors
//! reach `main`.

use thiserror::Error;

/// Scrape pipeline error
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure (DNS, connect, read)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Malformed document, selector or URL
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expected page element not present
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Metadata payload did not have the expected shape
    #[error("Normalize error: {0}")]
    Normalize(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network(err.to_string())
    }
}

/// Result type for pipeline operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;
