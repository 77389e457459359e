//! Error types for the listing module

use crate::error::Error as CrateError;
use crate::http::FetchError;
use thiserror::Error;

/// Error type for listing operations
#[derive(Debug, Error)]
pub enum ListingError {
    /// The author page could not be fetched
    #[error("Failed to fetch listing: {0}")]
    Fetch(#[source] FetchError),

    /// A configured CSS selector does not parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector {
        /// The selector as configured
        selector: String,
        /// Parser message
        message: String,
    },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl From<ListingError> for CrateError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Fetch(e) => e.into(),
            _ => CrateError::Listing(err.to_string()),
        }
    }
}
