//! Normalization of raw listing cards into article records

use crate::listing::{ArticleRecord, ListingConfig, RawListing};
use tracing::warn;
use url::Url;

pub const NO_TITLE: &str = "No Title Available";
pub const NO_SUMMARY: &str = "Summary not available";
pub const NO_DATE: &str = "Date not available";
pub const NO_URL: &str = "URL not available";

/// Resolve a possibly relative link against the site origin
///
/// Absolute links are returned unchanged. Returns `None` when the link cannot be
/// resolved at all.
pub fn resolve_url(site_origin: &str, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }

    let base = match Url::parse(site_origin) {
        Ok(base) => base,
        Err(e) => {
            warn!("Invalid site origin '{}': {}", site_origin, e);
            return None;
        }
    };

    match base.join(href) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!("Could not resolve '{}' against {}: {}", href, site_origin, e);
            None
        }
    }
}

/// Turn raw cards into article records, keeping page order
pub fn normalize_listing(raw: Vec<RawListing>, config: &ListingConfig) -> Vec<ArticleRecord> {
    raw.into_iter()
        .map(|card| {
            if card.title.is_none() {
                warn!("Listing card without a title, using placeholder");
            }

            let url = card
                .href
                .as_deref()
                .and_then(|href| resolve_url(&config.site_origin, href))
                .unwrap_or_else(|| NO_URL.to_string());

            let image_url = card
                .image
                .as_deref()
                .and_then(|src| resolve_url(&config.site_origin, src));

            ArticleRecord {
                title: card.title.unwrap_or_else(|| NO_TITLE.to_string()),
                author: config.author.clone(),
                summary: card.summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
                date: card.date.unwrap_or_else(|| NO_DATE.to_string()),
                url,
                image_url,
                position: None,
            }
        })
        .collect()
}

/// Assign reverse display positions, first record gets the highest number
pub fn assign_positions(records: &mut [ArticleRecord]) {
    let total = records.len();
    for (i, record) in records.iter_mut().enumerate() {
        record.position = Some(total - i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ListingConfig {
        ListingConfig::builder()
            .site_origin("https://blog.example.com")
            .author("Jane Doe")
            .build()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        assert_eq!(
            resolve_url("https://blog.example.com", "/post-one/").as_deref(),
            Some("https://blog.example.com/post-one/")
        );
        assert_eq!(
            resolve_url("https://blog.example.com", "https://cdn.example.org/a.jpg").as_deref(),
            Some("https://cdn.example.org/a.jpg")
        );
        assert_eq!(resolve_url("not an origin", "/post-one/"), None);
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let records = normalize_listing(vec![RawListing::default()], &config());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, NO_TITLE);
        assert_eq!(record.summary, NO_SUMMARY);
        assert_eq!(record.date, NO_DATE);
        assert_eq!(record.url, NO_URL);
        assert_eq!(record.author, "Jane Doe");
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_malformed_card_does_not_drop_others() {
        let raw = vec![
            RawListing {
                title: Some("Good".to_string()),
                href: Some("/good/".to_string()),
                ..Default::default()
            },
            RawListing::default(),
            RawListing {
                title: Some("Also Good".to_string()),
                href: Some("/also-good/".to_string()),
                image: Some("/img/cover.jpg".to_string()),
                ..Default::default()
            },
        ];

        let records = normalize_listing(raw, &config());
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", NO_TITLE, "Also Good"]);
        assert_eq!(
            records[2].image_url.as_deref(),
            Some("https://blog.example.com/img/cover.jpg")
        );
    }

    #[test]
    fn test_assign_positions() {
        let mut records = vec![
            ArticleRecord::new("a", "x", "s", "d", "u"),
            ArticleRecord::new("b", "x", "s", "d", "u"),
            ArticleRecord::new("c", "x", "s", "d", "u"),
        ];
        assign_positions(&mut records);

        let positions: Vec<_> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![Some(3), Some(2), Some(1)]);
    }
}
