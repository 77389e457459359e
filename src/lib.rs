//! # blogsync - incremental blog article mirroring
//!
//! This crate keeps a local markdown mirror of one author's blog articles. Each
//! sync run scrapes the author's listing page, works out which articles are not
//! yet in the local index, appends them, and writes one markdown document per
//! new article.
//!
//! ## Features
//!
//! - Listing extraction with configurable CSS selectors
//! - Title-keyed diff against a pipe-table index file, rewritten atomically
//! - Per-article fetch, body extraction and boilerplate cleanup that never
//!   aborts the batch
//! - Optional header image download and README table rendering
//! - Run lock, request timeouts and an overall run deadline
//!
//! ## Example
//!
//! ```rust,no_run
//! use blogsync::http::HttpFetcher;
//! use blogsync::ingest::{IngestConfig, Ingestor};
//! use blogsync::listing::ListingConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let listing = ListingConfig::builder()
//!         .listing_url("https://blog.min.io/author/david-cannan")
//!         .site_origin("https://blog.min.io")
//!         .author("David Cannan")
//!         .build();
//!
//!     let ingestor = Ingestor::new(HttpFetcher::new()?, listing, IngestConfig::default())?;
//!     let report = ingestor.run().await?;
//!
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

mod error;
pub mod http;
pub mod index;
pub mod ingest;
pub mod listing;

pub use error::Error;

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
