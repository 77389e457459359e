//! Index module
//!
//! The index is the record of every article already ingested. It is the only
//! state that survives between runs (besides the documents themselves) and the
//! thing new listings are diffed against.

pub mod error;
pub mod readme;
mod store;
pub mod table;

pub use error::IndexError;
pub use store::IndexStore;

use crate::listing::ArticleRecord;
use std::collections::{HashMap, HashSet};

/// Ordered set of previously ingested articles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    records: Vec<ArticleRecord>,
}

impl Index {
    /// Build an index from records in stored order
    pub fn from_records(records: Vec<ArticleRecord>) -> Self {
        Self { records }
    }

    /// Records in stored order
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Set of titles, the identity keys
    pub fn titles(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.records.iter().any(|r| r.title == title)
    }

    /// New index with `new_entries` appended after the existing rows
    pub fn appended(&self, new_entries: &[ArticleRecord]) -> Self {
        let mut records = self.records.clone();
        records.extend(new_entries.iter().map(|record| ArticleRecord {
            position: None,
            ..record.clone()
        }));
        Self { records }
    }

    /// Rows in display order with their `No.`
    ///
    /// Rows still on `listing` come first, ordered by descending scrape
    /// position, then the rest in stored order. `No.` counts down from N over
    /// that order, so the first-listed article is N and, as long as the listing
    /// shows every article, each row keeps its scrape position across runs.
    pub fn numbered_rows<'a>(&'a self, listing: &[ArticleRecord]) -> Vec<(usize, &'a ArticleRecord)> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for record in listing {
            if let Some(position) = record.position {
                positions.entry(record.title.as_str()).or_insert(position);
            }
        }

        let (mut ranked, unranked): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .partition(|r| positions.contains_key(r.title.as_str()));
        ranked.sort_by_key(|r| std::cmp::Reverse(positions[r.title.as_str()]));

        let total = self.records.len();
        ranked
            .into_iter()
            .chain(unranked)
            .enumerate()
            .map(|(i, record)| (total - i, record))
            .collect()
    }
}
