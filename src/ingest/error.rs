//! Error types for the ingest module
//!
//! Only failures that make the whole run meaningless live here. Per-article
//! problems are reported as [`SkipReason`](crate::ingest::SkipReason)s instead.

use crate::error::Error as CrateError;
use crate::index::IndexError;
use crate::listing::ListingError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for ingest runs
#[derive(Debug, Error)]
pub enum IngestError {
    /// The author listing could not be fetched or parsed
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// The index could not be loaded or saved
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The content selector does not parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector {
        /// The selector as configured
        selector: String,
        /// Parser message
        message: String,
    },

    /// Another run holds the lock
    #[error("Another run holds the lock at {0}")]
    Locked(PathBuf),

    /// A run-level IO failure, such as creating the documents directory
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl From<IngestError> for CrateError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Listing(e) => e.into(),
            IngestError::Index(e) => e.into(),
            _ => CrateError::Ingest(err.to_string()),
        }
    }
}
