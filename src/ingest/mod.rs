//! # Incremental Ingestor
//!
//! The core of a sync run. Given the persisted index and a fresh listing it
//! appends the articles not seen before and writes one markdown document per
//! new article.
//!
//! ## Run sequence
//!
//! 1. Take the run lock next to the index
//! 2. Load the index (missing file = empty, malformed file = abort)
//! 3. Fetch and normalize the listing (failure = abort)
//! 4. Diff by title; nothing new means nothing is written
//! 5. Replace the index with `existing ++ new` in one step, refresh the README
//! 6. Fetch, extract, clean and write each new article independently
//!
//! Step 6 never aborts the run. Each article either produces a document or a
//! [`SkipReason`] in the [`RunReport`].

mod clean;
mod config;
mod content;
mod diff;
mod document;
mod error;
mod lock;
mod report;
mod slug;

pub use clean::strip_boilerplate;
pub use config::{DEFAULT_MAX_SLUG_LEN, IngestConfig, IngestConfigBuilder};
pub use content::{ArticleContent, CONTENT_NOT_FOUND, ContentExtractor};
pub use diff::new_entries;
pub use document::{DocumentWriter, render_document};
pub use error::IngestError;
pub use lock::RunLock;
pub use report::{RunReport, SkipReason, SkippedArticle, WrittenDocument};
pub use slug::{MAX_SLUG_BYTES, slugify};

use crate::http::PageFetcher;
use crate::index::readme::update_readme;
use crate::index::{Index, IndexStore};
use crate::listing::{ArticleRecord, ListingConfig, fetch_listing};
use regex::Regex;
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::time::{Instant, sleep, timeout_at};
use tracing::{error, info, instrument, warn};

static ARTICLE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("article URL pattern is valid")
});

/// Runs incremental syncs for one author listing
pub struct Ingestor<F> {
    fetcher: F,
    listing: ListingConfig,
    config: IngestConfig,
    extractor: ContentExtractor,
    documents: DocumentWriter,
}

impl<F: PageFetcher> Ingestor<F> {
    /// Create an ingestor
    ///
    /// Fails if the content selector does not parse.
    pub fn new(fetcher: F, listing: ListingConfig, config: IngestConfig) -> Result<Self, IngestError> {
        let extractor = ContentExtractor::new(&config.content_selector)?;
        let documents = DocumentWriter::new(config.articles_dir.clone(), config.images_dir());

        Ok(Self {
            fetcher,
            listing,
            config,
            extractor,
            documents,
        })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Run one sync
    #[instrument(skip(self), fields(listing = %self.listing.listing_url))]
    pub async fn run(&self) -> Result<RunReport, IngestError> {
        let deadline = self.config.run_deadline.map(|limit| Instant::now() + limit);
        let _lock = RunLock::acquire(&self.config.lock_path())?;

        let store = IndexStore::new(&self.config.index_path);
        let existing = store.load().await?;
        info!("Index holds {} articles", existing.len());

        let listing = fetch_listing(&self.fetcher, &self.listing).await?;

        let fresh = new_entries(&existing, &listing);
        let mut report = RunReport {
            listed: listing.len(),
            new_entries: fresh.iter().map(|r| r.title.clone()).collect(),
            ..Default::default()
        };

        if fresh.is_empty() {
            info!("No new articles found");
            return Ok(report);
        }

        let updated = existing.appended(&fresh);
        store.save(&updated).await?;
        info!(
            "Added {} new articles to {}",
            fresh.len(),
            self.config.index_path.display()
        );

        if let Some(readme) = &self.config.readme_path {
            if let Err(e) = update_readme(readme, &updated, &listing, &self.config.readme_heading).await {
                error!("Failed to update README {}: {}", readme.display(), e);
                report.readme_error = Some(e.to_string());
            }
        }

        self.ingest_articles(&fresh, deadline, &mut report).await?;

        info!("{}", report);
        Ok(report)
    }

    async fn ingest_articles(
        &self,
        records: &[ArticleRecord],
        deadline: Option<Instant>,
        report: &mut RunReport,
    ) -> Result<(), IngestError> {
        let articles_dir = self.documents.articles_dir();
        tokio::fs::create_dir_all(articles_dir)
            .await
            .map_err(|source| IngestError::Io {
                path: articles_dir.to_path_buf(),
                source,
            })?;

        for (i, record) in records.iter().enumerate() {
            if i > 0 && self.config.request_delay_ms > 0 {
                sleep(self.config.request_delay()).await;
            }

            let outcome = if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                Err(SkipReason::DeadlineExceeded)
            } else {
                self.ingest_article(record, deadline).await
            };

            match outcome {
                Ok(written) => {
                    info!("Generated markdown file for article: {}", record.title);
                    report.written.push(written);
                }
                Err(reason) => {
                    warn!("Skipped article '{}': {}", record.title, reason);
                    report.skipped.push(SkippedArticle {
                        title: record.title.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(())
    }

    /// Ingest one article
    ///
    /// `deadline` bounds the network requests only. Once the page is in hand
    /// the document is always written in full.
    #[instrument(skip(self, record, deadline), fields(title = %record.title, url = %record.url))]
    async fn ingest_article(
        &self,
        record: &ArticleRecord,
        deadline: Option<Instant>,
    ) -> Result<WrittenDocument, SkipReason> {
        if !ARTICLE_URL.is_match(&record.url) {
            return Err(SkipReason::InvalidUrl(record.url.clone()));
        }

        let slug = slugify(&record.title, self.config.max_slug_len);
        if self.documents.document_exists(&slug).await {
            return Err(SkipReason::DocumentExists(self.documents.document_path(&slug)));
        }

        let page = before_deadline(deadline, self.fetcher.fetch(&record.url))
            .await
            .ok_or(SkipReason::DeadlineExceeded)?
            .map_err(|e| SkipReason::FetchFailed(e.to_string()))?;

        let content = self.extractor.read(&record.url, &page.body);
        let mut body = content.body.unwrap_or_else(|| {
            warn!("Content region '{}' not found", self.config.content_selector);
            CONTENT_NOT_FOUND.to_string()
        });
        if self.config.clean_content {
            body = strip_boilerplate(&body, &self.config.boilerplate_markers);
        }

        let image = if self.config.download_images {
            let source = record.image_url.clone().or(content.og_image);
            self.download_image(&slug, source, deadline).await
        } else {
            None
        };

        let image_link = image.as_ref().map(|_| self.documents.image_link(&slug));
        let markdown = render_document(&record.title, &body, image_link.as_deref());

        let path = self
            .documents
            .create_document(&slug, &markdown)
            .await
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    SkipReason::DocumentExists(self.documents.document_path(&slug))
                } else {
                    SkipReason::WriteFailed(e.to_string())
                }
            })?;

        Ok(WrittenDocument {
            title: record.title.clone(),
            path,
            image,
        })
    }

    /// Best-effort image download, `None` on any failure
    async fn download_image(
        &self,
        slug: &str,
        source: Option<String>,
        deadline: Option<Instant>,
    ) -> Option<PathBuf> {
        let url = source?;

        let bytes = match before_deadline(deadline, self.fetcher.fetch_bytes(&url)).await {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                warn!("Failed to download image {}: {}", url, e);
                return None;
            }
            None => {
                warn!("Run deadline passed while downloading image {}", url);
                return None;
            }
        };

        match self.documents.write_image(slug, &bytes).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Failed to save image for {}: {}", slug, e);
                None
            }
        }
    }
}

/// Await `future` unless `deadline` passes first
async fn before_deadline<T>(deadline: Option<Instant>, future: impl Future<Output = T>) -> Option<T> {
    match deadline {
        Some(deadline) => timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}

/// Load the index at `path` without running a sync
pub async fn load_index(path: impl Into<PathBuf>) -> Result<Index, IngestError> {
    Ok(IndexStore::new(path).load().await?)
}
