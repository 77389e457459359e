//! Set difference between a fresh listing and the index

use crate::index::Index;
use crate::listing::ArticleRecord;
use std::collections::HashSet;
use tracing::warn;

/// Records of `listing` whose title is not in `existing`, in listing order
///
/// A title repeated within the listing is only taken once.
pub fn new_entries(existing: &Index, listing: &[ArticleRecord]) -> Vec<ArticleRecord> {
    let known = existing.titles();
    let mut seen: HashSet<String> = HashSet::new();

    listing
        .iter()
        .filter(|record| !known.contains(record.title.as_str()))
        .filter(|record| {
            let first = seen.insert(record.title.clone());
            if !first {
                warn!("Duplicate title in listing, keeping first: {}", record.title);
            }
            first
        })
        .cloned()
        .collect()
}
