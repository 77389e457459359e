//! # Ingest Configuration Module
//!
//! Everything a sync run needs to know besides the listing: where the index and
//! documents live, how article pages are read and cleaned, and the hardening
//! limits for a run.
//!
//! ## Key Components
//!
//! - `IngestConfig`: The main configuration struct
//! - `IngestConfigBuilder`: Builder pattern implementation for easier configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default maximum slug length in characters
pub const DEFAULT_MAX_SLUG_LEN: usize = 250;

/// Configuration for an ingest run
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Pipe-table index file
    pub index_path: PathBuf,

    /// Directory for article documents
    pub articles_dir: PathBuf,

    /// README whose marker region mirrors the index
    pub readme_path: Option<PathBuf>,

    /// Heading used when the README has to be created
    pub readme_heading: String,

    /// CSS selector of the article body on an article page
    pub content_selector: String,

    /// Maximum slug length in characters
    pub max_slug_len: usize,

    /// Substrings that start a boilerplate run
    pub boilerplate_markers: Vec<String>,

    /// Whether to strip boilerplate from the body
    pub clean_content: bool,

    /// Whether to download header images
    pub download_images: bool,

    /// Delay in milliseconds between article fetches
    pub request_delay_ms: u64,

    /// Deadline for the whole per-article phase
    pub run_deadline: Option<Duration>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("articles.md"),
            articles_dir: PathBuf::from("articles"),
            readme_path: None,
            readme_heading: "Publications".to_string(),
            content_selector: "article".to_string(),
            max_slug_len: DEFAULT_MAX_SLUG_LEN,
            boilerplate_markers: vec![
                "Share this".to_string(),
                "Share on".to_string(),
                "Follow us".to_string(),
                "Follow on".to_string(),
                "Subscribe".to_string(),
                "Previous Post".to_string(),
                "Next Post".to_string(),
                "Back to Blog".to_string(),
            ],
            clean_content: true,
            download_images: false,
            request_delay_ms: 0,
            run_deadline: None,
        }
    }
}

/// Builder for IngestConfig
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    config: IngestConfig,
}

impl IngestConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: IngestConfig::default(),
        }
    }

    /// Set the index file path
    pub fn index_path(mut self, index_path: impl Into<PathBuf>) -> Self {
        self.config.index_path = index_path.into();
        self
    }

    /// Set the documents directory
    pub fn articles_dir(mut self, articles_dir: impl Into<PathBuf>) -> Self {
        self.config.articles_dir = articles_dir.into();
        self
    }

    /// Set the README to keep in sync
    pub fn readme_path(mut self, readme_path: Option<PathBuf>) -> Self {
        self.config.readme_path = readme_path;
        self
    }

    /// Set the heading for a newly created README
    pub fn readme_heading(mut self, readme_heading: impl Into<String>) -> Self {
        self.config.readme_heading = readme_heading.into();
        self
    }

    /// Set the article body selector
    pub fn content_selector(mut self, content_selector: impl Into<String>) -> Self {
        self.config.content_selector = content_selector.into();
        self
    }

    /// Set the maximum slug length
    pub fn max_slug_len(mut self, max_slug_len: usize) -> Self {
        self.config.max_slug_len = max_slug_len;
        self
    }

    /// Set the boilerplate markers
    pub fn boilerplate_markers(mut self, boilerplate_markers: Vec<String>) -> Self {
        self.config.boilerplate_markers = boilerplate_markers;
        self
    }

    /// Set whether boilerplate is stripped
    pub fn clean_content(mut self, clean_content: bool) -> Self {
        self.config.clean_content = clean_content;
        self
    }

    /// Set whether header images are downloaded
    pub fn download_images(mut self, download_images: bool) -> Self {
        self.config.download_images = download_images;
        self
    }

    /// Set the delay between article fetches
    pub fn request_delay_ms(mut self, request_delay_ms: u64) -> Self {
        self.config.request_delay_ms = request_delay_ms;
        self
    }

    /// Set the run deadline
    pub fn run_deadline(mut self, run_deadline: Option<Duration>) -> Self {
        self.config.run_deadline = run_deadline;
        self
    }

    /// Build the configuration
    pub fn build(self) -> IngestConfig {
        self.config
    }
}

impl IngestConfig {
    /// Create a new builder
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::new()
    }

    /// Directory for header images
    pub fn images_dir(&self) -> PathBuf {
        self.articles_dir.join("images")
    }

    /// Lock file guarding the index against overlapping runs
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .index_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.index_path.with_file_name(name)
    }

    /// Delay between article fetches as a Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}
