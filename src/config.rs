//! Dashboard Configuration
//!
//! Compile-time defaults for the feed proxy, built-in sources and debounce timing.

use crate::models::FeedSource;

/// Feed-to-JSON translation service
pub const RSS2JSON_ENDPOINT: &str = "https://api.rss2json.com/v1/api.json";

/// Settings for the feed aggregator and the feed preview form
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub endpoint: String,
    /// Items shown per source card
    pub max_items: usize,
    /// Headlines shown in the add-feed preview
    pub preview_items: usize,
    pub builtin_sources: Vec<FeedSource>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: RSS2JSON_ENDPOINT.to_string(),
            max_items: 5,
            preview_items: 3,
            builtin_sources: builtin_sources(),
        }
    }
}

/// Debounce intervals for URL preview inputs (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebounceConfig {
    pub feed_preview_ms: u32,
    pub wallpaper_preview_ms: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            feed_preview_ms: 600,
            wallpaper_preview_ms: 250,
        }
    }
}

fn builtin_sources() -> Vec<FeedSource> {
    const SOURCES: &[(&str, &str, &str)] = &[
        (
            "Krebs on Security",
            "https://krebsonsecurity.com/feed/",
            "https://krebsonsecurity.com/favicon.ico",
        ),
        (
            "Hacker News",
            "https://news.ycombinator.com/rss",
            "https://news.ycombinator.com/favicon.ico",
        ),
        (
            "CISA Advisories",
            "https://www.cisa.gov/cybersecurity-advisories/cybersecurity-advisories.xml",
            "https://www.cisa.gov/sites/default/files/favicon.ico",
        ),
    ];

    SOURCES
        .iter()
        .map(|(name, rss_url, icon)| FeedSource::builtin(name, rss_url, icon))
        .collect()
}
