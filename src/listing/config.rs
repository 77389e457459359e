//! # Listing Configuration Module
//!
//! Where the author page lives, who the author is, and how to find the article
//! cards on it. Uses the same builder pattern as the ingest configuration.

/// CSS selectors used to pick apart the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    /// One match per article card
    pub card: String,

    /// Title inside a card
    pub title: String,

    /// Summary inside a card
    pub summary: String,

    /// Date element inside a card; its `datetime` attribute wins over its text
    pub date: String,

    /// Link to the article inside a card
    pub link: String,

    /// Card image
    pub image: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            card: "article.post-card".to_string(),
            title: "h2".to_string(),
            summary: ".post__content".to_string(),
            date: "time".to_string(),
            link: "a[href]".to_string(),
            image: "img[src]".to_string(),
        }
    }
}

/// Configuration for fetching and normalizing the listing
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// The author's listing page
    pub listing_url: String,

    /// Origin relative links are resolved against
    pub site_origin: String,

    /// Author name stamped on every record
    pub author: String,

    /// Card selectors
    pub selectors: ListingSelectors,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://blog.min.io/author/david-cannan".to_string(),
            site_origin: "https://blog.min.io".to_string(),
            author: "David Cannan".to_string(),
            selectors: ListingSelectors::default(),
        }
    }
}

/// Builder for ListingConfig
#[derive(Debug, Default)]
pub struct ListingConfigBuilder {
    config: ListingConfig,
}

impl ListingConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ListingConfig::default(),
        }
    }

    /// Set the listing page URL
    pub fn listing_url(mut self, listing_url: impl Into<String>) -> Self {
        self.config.listing_url = listing_url.into();
        self
    }

    /// Set the site origin used for relative links
    pub fn site_origin(mut self, site_origin: impl Into<String>) -> Self {
        self.config.site_origin = site_origin.into();
        self
    }

    /// Set the author name
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    /// Set the card selectors
    pub fn selectors(mut self, selectors: ListingSelectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ListingConfig {
        self.config
    }
}

impl ListingConfig {
    /// Create a new builder
    pub fn builder() -> ListingConfigBuilder {
        ListingConfigBuilder::new()
    }
}
