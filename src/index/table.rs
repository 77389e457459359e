//! Pipe-delimited table format of the index file
//!
//! ```text
//! | Title | Author | Summary | Date | URL |
//! | ----- | ------ | ------- | ---- | --- |
//! | Old Post | Jane Doe | ... | 2024-01-01 | https://blog.example.com/old-post/ |
//! ```
//!
//! Literal `|` and `\` inside a cell are backslash-escaped and line breaks are
//! folded to spaces, so every record stays on one line. Rows without the outer
//! pipes (`title|author|summary|date|url`) are accepted when reading.

use crate::index::error::IndexError;
use crate::listing::ArticleRecord;

pub const HEADER: &str = "| Title | Author | Summary | Date | URL |";
pub const SEPARATOR: &str = "| ----- | ------ | ------- | ---- | --- |";

const COLUMNS: [&str; 5] = ["title", "author", "summary", "date", "url"];

/// Escape a value for use as a table cell
pub fn escape_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\r' | '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Split a row into unescaped cells, dropping the outer pipes
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next) => current.push(next),
                None => current.push('\\'),
            },
            '|' => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);

    if line.starts_with('|') {
        segments.remove(0);
    }
    // An unescaped closing pipe leaves an empty trailing segment
    if line.len() > 1 && line.ends_with('|') && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    segments.into_iter().map(|s| s.trim().to_string()).collect()
}

fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
}

/// Render a single record as a table row
pub fn render_row(record: &ArticleRecord) -> String {
    format!(
        "| {} | {} | {} | {} | {} |",
        escape_cell(&record.title),
        escape_cell(&record.author),
        escape_cell(&record.summary),
        escape_cell(&record.date),
        escape_cell(&record.url),
    )
}

/// Render the full index table, header included
pub fn render_table(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    for record in records {
        out.push_str(&render_row(record));
        out.push('\n');
    }
    out
}

/// Parse the index table
///
/// Empty or whitespace-only text is an empty index. Anything that is not the
/// expected header, separator and 5-column rows is rejected.
pub fn parse_table(text: &str) -> Result<Vec<ArticleRecord>, IndexError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((line_no, header)) = lines.next() else {
        return Ok(Vec::new());
    };

    let header_cells: Vec<String> = split_row(header)
        .into_iter()
        .map(|c| c.to_lowercase())
        .collect();
    if header_cells != COLUMNS {
        return Err(IndexError::malformed(
            line_no,
            format!("expected header '{}', found '{}'", HEADER, header.trim()),
        ));
    }

    match lines.next() {
        Some((_, separator)) if is_separator(&split_row(separator)) => {}
        Some((line_no, other)) => {
            return Err(IndexError::malformed(
                line_no,
                format!("expected separator row, found '{}'", other.trim()),
            ));
        }
        None => return Ok(Vec::new()),
    }

    let mut records = Vec::new();
    for (line_no, line) in lines {
        let cells = split_row(line);
        if cells.len() != COLUMNS.len() {
            return Err(IndexError::malformed(
                line_no,
                format!("expected {} columns, found {}", COLUMNS.len(), cells.len()),
            ));
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        let record = ArticleRecord::new(next(), next(), next(), next(), next());
        if record.title.is_empty() {
            return Err(IndexError::malformed(line_no, "empty title"));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row_with_and_without_borders() {
        assert_eq!(split_row("| a | b | c |"), vec!["a", "b", "c"]);
        assert_eq!(split_row("a|b|c"), vec!["a", "b", "c"]);
        assert_eq!(split_row("| a |  | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_escaped_pipes_survive() {
        let record = ArticleRecord::new(
            "Pipes | and \\ slashes",
            "Jane Doe",
            "line one\nline two",
            "2024-01-01",
            "https://blog.example.com/pipes/",
        );

        let parsed = parse_table(&render_table(std::slice::from_ref(&record))).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Pipes | and \\ slashes");
        assert_eq!(parsed[0].summary, "line one line two");
    }

    #[test]
    fn test_parse_empty_and_header_only() {
        assert!(parse_table("").unwrap().is_empty());
        assert!(parse_table("  \n\n").unwrap().is_empty());
        assert!(
            parse_table(&format!("{}\n{}\n", HEADER, SEPARATOR))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_legacy_rows() {
        let text = format!(
            "{}\n{}\nOld Post|Jane Doe|About things|Jan 1|https://blog.example.com/old/\n",
            HEADER, SEPARATOR
        );
        let records = parse_table(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Old Post");
        assert_eq!(records[0].url, "https://blog.example.com/old/");
    }

    #[test]
    fn test_rejects_missing_header() {
        let result = parse_table("| Old Post | Jane | s | d | u |\n");
        assert!(matches!(result, Err(IndexError::Malformed { line: 1, .. })));
    }

    #[test]
    fn test_rejects_missing_separator() {
        let text = format!("{}\n| Old Post | Jane | s | d | u |\n", HEADER);
        assert!(matches!(
            parse_table(&text),
            Err(IndexError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_column_count() {
        let text = format!("{}\n{}\n| a | b | c | d | e |\n| a | b |\n", HEADER, SEPARATOR);
        match parse_table(&text) {
            Err(IndexError::Malformed { line, reason }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("columns"));
            }
            other => panic!("Expected Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_title() {
        let text = format!("{}\n{}\n|  | b | c | d | e |\n", HEADER, SEPARATOR);
        assert!(matches!(
            parse_table(&text),
            Err(IndexError::Malformed { line: 3, .. })
        ));
    }
}
