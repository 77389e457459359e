//! # Listing Module
//!
//! Turns an author's listing page into an ordered sequence of [`ArticleRecord`]s.
//! This is the first stage of a sync run: whatever comes out of here is diffed
//! against the index by the ingestor.
//!
//! ## Key Components
//!
//! - `ListingConfig`: site origin, author name and card selectors
//! - `extract_listing`: CSS-selector scraping of the page into `RawListing` fragments
//! - `normalize_listing`: placeholder substitution, URL resolution, ordering
//! - `fetch_listing`: fetch + extract + normalize in one call
//!
//! A malformed card never fails the listing. Missing fields become placeholder
//! strings and the card is kept.

mod config;
mod error;
mod extraction;
mod normalize;

pub use config::{ListingConfig, ListingConfigBuilder, ListingSelectors};
pub use error::ListingError;
pub use extraction::extract_listing;
pub use normalize::{
    NO_DATE, NO_SUMMARY, NO_TITLE, NO_URL, assign_positions, normalize_listing, resolve_url,
};

use crate::http::PageFetcher;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One scraped or stored article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Title of the article, the identity key
    pub title: String,

    /// Author of the article
    pub author: String,

    /// Summary shown on the listing page
    pub summary: String,

    /// Display date, not guaranteed to be comparable
    pub date: String,

    /// Absolute URL of the article, or the `NO_URL` placeholder
    pub url: String,

    /// Header image URL, if the card had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Reverse display rank (N down to 1), never used for identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl ArticleRecord {
    /// Create a record without image or position
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        summary: impl Into<String>,
        date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            summary: summary.into(),
            date: date.into(),
            url: url.into(),
            image_url: None,
            position: None,
        }
    }
}

/// Raw per-card fragment as found on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    pub href: Option<String>,
    pub image: Option<String>,
}

/// Fetch the author page and produce the normalized listing
///
/// Any fetch failure is fatal to the run: without a listing there is nothing to
/// diff against.
#[instrument(skip(fetcher, config), fields(url = %config.listing_url))]
pub async fn fetch_listing(
    fetcher: &dyn PageFetcher,
    config: &ListingConfig,
) -> Result<Vec<ArticleRecord>, ListingError> {
    let page = fetcher
        .fetch(&config.listing_url)
        .await
        .map_err(ListingError::Fetch)?;

    let raw = extract_listing(&page.body, &config.selectors)?;
    let mut records = normalize_listing(raw, config);
    assign_positions(&mut records);

    info!("Listing contains {} articles", records.len());
    Ok(records)
}
