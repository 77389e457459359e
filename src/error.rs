//! Error types for the blogsync crate

use thiserror::Error;

/// Result type for blogsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for blogsync operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Page fetch failed or returned a non-success status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Author listing could not be fetched or parsed
    #[error("Listing error: {0}")]
    Listing(String),

    /// Index file could not be read, parsed or written
    #[error("Index error: {0}")]
    Index(String),

    /// Ingestion run failed
    #[error("Ingest error: {0}")]
    Ingest(String),
}
