//! Feed Client
//!
//! Fetches a feed through the rss2json translation service and normalizes the
//! response.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::config::FeedConfig;
use crate::error::FeedError;

/// Characters `encodeURIComponent` leaves alone: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ========================
// Wire Format
// ========================

/// Body returned by the translation service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub feed: Option<FeedMeta>,
    #[serde(default)]
    pub items: Vec<FeedResponseItem>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedResponseItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
}

// ========================
// Normalized Feed
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub published_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub items: Vec<FeedItem>,
    /// Number of items kept (never more than the configured cap)
    pub fetched_count: usize,
}

impl FeedResponse {
    /// Validate the service status and keep at most `max_items` items.
    /// `fallback_title` is used when the feed reports no title.
    pub fn into_document(self, fallback_title: &str, max_items: usize) -> Result<FeedDocument, FeedError> {
        if self.status != "ok" {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Invalid feed".to_string());
            return Err(FeedError::Api(message));
        }

        let meta = self.feed.unwrap_or_default();
        let items: Vec<FeedItem> = self
            .items
            .into_iter()
            .take(max_items)
            .map(|item| FeedItem {
                title: item.title.unwrap_or_default(),
                link: item.link.unwrap_or_default(),
                published_date: item.pub_date.unwrap_or_default(),
            })
            .collect();

        Ok(FeedDocument {
            title: non_empty(meta.title).unwrap_or_else(|| fallback_title.to_string()),
            link: non_empty(meta.link).unwrap_or_else(|| "#".to_string()),
            fetched_count: items.len(),
            items,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ========================
// Client
// ========================

/// Source of translated feeds. Futures are not `Send`: in the browser they run
/// on the page's single thread.
#[async_trait(?Send)]
pub trait FeedClient {
    async fn fetch(&self, rss_url: &str) -> Result<FeedResponse, FeedError>;
}

/// Client for the rss2json service
#[derive(Debug, Clone)]
pub struct Rss2JsonClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Rss2JsonClient {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// `<endpoint>?rss_url=<percent-encoded feed url>`
    pub fn request_url(&self, rss_url: &str) -> String {
        request_url(&self.endpoint, rss_url)
    }
}

pub fn request_url(endpoint: &str, rss_url: &str) -> String {
    format!("{}?rss_url={}", endpoint, utf8_percent_encode(rss_url, URI_COMPONENT))
}

#[async_trait(?Send)]
impl FeedClient for Rss2JsonClient {
    async fn fetch(&self, rss_url: &str) -> Result<FeedResponse, FeedError> {
        let url = self.request_url(rss_url);
        log::debug!("[FEEDS] GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        response
            .json::<FeedResponse>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RSS2JSON_ENDPOINT;

    #[test]
    fn test_request_url_encodes_like_uri_component() {
        let url = request_url(RSS2JSON_ENDPOINT, "https://example.com/feed?a=1&b=two words");
        assert_eq!(
            url,
            "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fexample.com%2Ffeed%3Fa%3D1%26b%3Dtwo%20words"
        );
        assert!(request_url(RSS2JSON_ENDPOINT, "a-b_c.d!e~f*g'h(i)").ends_with("=a-b_c.d!e~f*g'h(i)"));
    }

    #[test]
    fn test_response_with_error_status_is_api_error() {
        let response: FeedResponse =
            serde_json::from_str(r#"{"status":"error","message":"Cannot download this RSS feed"}"#).unwrap();
        match response.into_document("Blog", 5) {
            Err(FeedError::Api(message)) => assert_eq!(message, "Cannot download this RSS feed"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_document_caps_items_and_applies_fallbacks() {
        let items: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"title":"Post {i}","link":"https://blog.example/{i}","pubDate":"2024-03-0{} 10:00:00"}}"#, i + 1))
            .collect();
        let body = format!(r#"{{"status":"ok","feed":{{"title":"","link":""}},"items":[{}]}}"#, items.join(","));
        let response: FeedResponse = serde_json::from_str(&body).unwrap();

        let document = response.into_document("My Blog", 5).unwrap();
        assert_eq!(document.title, "My Blog");
        assert_eq!(document.link, "#");
        assert_eq!(document.fetched_count, 5);
        assert_eq!(document.items.len(), 5);
        assert_eq!(document.items[0].title, "Post 0");
        assert_eq!(document.items[4].published_date, "2024-03-05 10:00:00");
    }
}
