//! Run summary

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why an article did not get a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// URL missing, a placeholder, or not absolute http(s)
    InvalidUrl(String),

    /// A document with the same slug is already on disk
    DocumentExists(PathBuf),

    /// Transport or status failure fetching the article page
    FetchFailed(String),

    /// The document could not be written
    WriteFailed(String),

    /// The run deadline passed before the article was done
    DeadlineExceeded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(url) => write!(f, "invalid URL '{}'", url),
            Self::DocumentExists(path) => write!(f, "document exists at {}", path.display()),
            Self::FetchFailed(message) => write!(f, "fetch failed: {}", message),
            Self::WriteFailed(message) => write!(f, "write failed: {}", message),
            Self::DeadlineExceeded => write!(f, "run deadline exceeded"),
        }
    }
}

/// A document created during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenDocument {
    pub title: String,
    pub path: PathBuf,
    pub image: Option<PathBuf>,
}

/// An article that was indexed but got no document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedArticle {
    pub title: String,
    pub reason: SkipReason,
}

/// Outcome of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Articles on the listing page
    pub listed: usize,

    /// Titles appended to the index, in listing order
    pub new_entries: Vec<String>,

    /// Documents created
    pub written: Vec<WrittenDocument>,

    /// Articles without a document, with the reason
    pub skipped: Vec<SkippedArticle>,

    /// Set when the README could not be updated
    pub readme_error: Option<String>,
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

impl RunReport {
    /// Whether the run changed nothing
    pub fn is_noop(&self) -> bool {
        self.new_entries.is_empty()
    }

    /// One-line summary of additions, e.g. `1 new article added`
    pub fn headline(&self) -> String {
        if self.is_noop() {
            "No new articles found".to_string()
        } else {
            format!(
                "{} added",
                plural(self.new_entries.len(), "new article", "new articles")
            )
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            return write!(f, "{}", self.headline());
        }
        write!(
            f,
            "{}, {} written, {} skipped",
            self.headline(),
            plural(self.written.len(), "document", "documents"),
            self.skipped.len()
        )
    }
}
