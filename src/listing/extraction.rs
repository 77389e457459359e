//! Card extraction for the listing page

use crate::listing::error::ListingError;
use crate::listing::{ListingSelectors, RawListing};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

fn parse_selector(selector: &str) -> Result<Selector, ListingError> {
    Selector::parse(selector).map_err(|e| ListingError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Collapse runs of whitespace into single spaces and trim
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_text(card: &ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

fn first_attr(card: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Extract raw article cards from a listing page
///
/// # Arguments
///
/// * `html` - The listing page HTML
/// * `selectors` - Card and field selectors
///
/// # Returns
///
/// One `RawListing` per card, in page order. Fields that are not found are `None`.
pub fn extract_listing(
    html: &str,
    selectors: &ListingSelectors,
) -> Result<Vec<RawListing>, ListingError> {
    let card = parse_selector(&selectors.card)?;
    let title = parse_selector(&selectors.title)?;
    let summary = parse_selector(&selectors.summary)?;
    let date = parse_selector(&selectors.date)?;
    let link = parse_selector(&selectors.link)?;
    let image = parse_selector(&selectors.image)?;

    let document = Html::parse_document(html);

    let cards: Vec<RawListing> = document
        .select(&card)
        .map(|element| RawListing {
            title: first_text(&element, &title),
            summary: first_text(&element, &summary),
            date: first_attr(&element, &date, "datetime").or_else(|| first_text(&element, &date)),
            href: first_attr(&element, &link, "href"),
            image: first_attr(&element, &image, "src"),
        })
        .collect();

    debug!("Extracted {} cards from listing", cards.len());
    Ok(cards)
}
