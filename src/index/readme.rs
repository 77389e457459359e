//! README rendering of the index
//!
//! The README holds a human-readable table between two fixed markers. The table
//! is always regenerated from the index; it is never parsed back. Everything
//! outside the markers is left byte for byte as it was.

use crate::index::error::IndexError;
use crate::index::store::write_atomic;
use crate::index::table::escape_cell;
use crate::index::Index;
use crate::listing::ArticleRecord;
use chrono::{DateTime, Utc};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const START_MARKER: &str = "<!-- START_ARTICLES -->";
pub const END_MARKER: &str = "<!-- END_ARTICLES -->";

/// Escape a URL for use as a markdown link target inside a table cell
pub fn escape_link_target(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '|' => out.push_str("%7C"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            ' ' => out.push_str("%20"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the numbered README table for the index
///
/// Rows and numbers come from [`Index::numbered_rows`]: with the current
/// `listing` the first-listed article is on top as N; with an empty listing the
/// stored order is used.
pub fn render_readme_table(
    index: &Index,
    listing: &[ArticleRecord],
    updated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str("| No. | Title | Author | Summary | Date | URL |\n");
    out.push_str("| --- | ----- | ------ | ------- | ---- | --- |\n");

    for (number, record) in index.numbered_rows(listing) {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | [Link]({}) |\n",
            number,
            escape_cell(&record.title),
            escape_cell(&record.author),
            escape_cell(&record.summary),
            escape_cell(&record.date),
            escape_link_target(&record.url),
        ));
    }

    out.push_str(&format!(
        "\n_Last updated: {}_\n",
        updated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// Replace the text between the markers with `region`
///
/// Without any marker the region is appended at the end of the document.
pub fn splice_region(document: &str, region: &str) -> Result<String, IndexError> {
    match (document.find(START_MARKER), document.find(END_MARKER)) {
        (Some(start), Some(end)) if start < end => {
            let inner_start = start + START_MARKER.len();
            let mut out = String::with_capacity(document.len() + region.len());
            out.push_str(&document[..inner_start]);
            out.push('\n');
            out.push_str(region);
            out.push_str(&document[end..]);
            Ok(out)
        }
        (Some(_), Some(_)) => Err(IndexError::Markers(format!(
            "{} appears before {}",
            END_MARKER, START_MARKER
        ))),
        (None, None) => {
            let mut out = document.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("\n{}\n{}{}\n", START_MARKER, region, END_MARKER));
            Ok(out)
        }
        (Some(_), None) => Err(IndexError::Markers(format!("missing {}", END_MARKER))),
        (None, Some(_)) => Err(IndexError::Markers(format!("missing {}", START_MARKER))),
    }
}

/// Regenerate the README table from the index
///
/// A missing README is created with `heading` as its title. `listing` orders
/// and numbers the rows, see [`render_readme_table`].
#[instrument(skip(path, index, listing, heading), fields(path = %path.display()))]
pub async fn update_readme(
    path: &Path,
    index: &Index,
    listing: &[ArticleRecord],
    heading: &str,
) -> Result<(), IndexError> {
    let document = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => format!("# {}\n", heading),
        Err(e) => return Err(IndexError::io(path, e)),
    };

    let region = render_readme_table(index, listing, Utc::now());
    let updated = splice_region(&document, &region)?;
    write_atomic(path, &updated).await?;

    info!("README table updated with {} articles", index.len());
    Ok(())
}
