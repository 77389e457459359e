//! # Index Error Types Module
//!
//! Errors raised while loading, parsing or persisting the article index and
//! the README rendering of it.
//!
//! A missing index file is not an error, the store reports an empty index for it.
//! Anything else that goes wrong here is fatal to a sync run, since continuing
//! with a corrupt index would treat every article as new.

use crate::error::Error as CrateError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for index operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error while reading or writing index files
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The index table does not have the expected shape
    #[error("Malformed index at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The README marker region is broken
    #[error("Marker error: {0}")]
    Markers(String),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

impl From<IndexError> for CrateError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Io { source, .. } => CrateError::Io(source),
            _ => CrateError::Index(err.to_string()),
        }
    }
}
