//! Feed Preview
//!
//! Validates a candidate feed url for the add-feed form. The save button stays
//! disabled until a preview succeeds.

use super::client::FeedClient;

/// What the add-feed form shows for a successful preview
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPreview {
    pub title: String,
    pub headlines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// Blank url: no request was made
    Skipped,
    Ready(FeedPreview),
    /// User-facing message
    Failed(String),
}

impl PreviewOutcome {
    pub fn can_save(&self) -> bool {
        matches!(self, PreviewOutcome::Ready(_))
    }
}

/// Fetch `url` once and summarize it. `typed_name` is the name the user
/// entered, used when the feed has no title.
pub async fn preview_feed<C>(client: &C, url: &str, typed_name: &str, max_headlines: usize) -> PreviewOutcome
where
    C: FeedClient + ?Sized,
{
    let url = url.trim();
    if url.is_empty() {
        return PreviewOutcome::Skipped;
    }

    let fallback = match typed_name.trim() {
        "" => "Untitled",
        name => name,
    };

    let result = match client.fetch(url).await {
        Ok(response) => response.into_document(fallback, max_headlines),
        Err(e) => Err(e),
    };

    match result {
        Ok(feed) => PreviewOutcome::Ready(FeedPreview {
            title: feed.title,
            headlines: feed.items.into_iter().map(|item| item.title).collect(),
        }),
        Err(e) => {
            log::warn!("[FEEDS] Preview failed for {}: {}", url, e);
            PreviewOutcome::Failed(format!("Could not load preview for this RSS URL. {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::feeds::client::FeedResponse;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FixedClient {
        body: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl FixedClient {
        fn new(body: Option<&'static str>) -> Self {
            Self { body, calls: Cell::new(0) }
        }
    }

    #[async_trait(?Send)]
    impl FeedClient for FixedClient {
        async fn fetch(&self, _rss_url: &str) -> Result<FeedResponse, FeedError> {
            self.calls.set(self.calls.get() + 1);
            match self.body {
                Some(body) => serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string())),
                None => Err(FeedError::Status(404)),
            }
        }
    }

    #[test]
    fn test_blank_url_never_requests() {
        let client = FixedClient::new(None);
        assert_eq!(block_on(preview_feed(&client, "   ", "Blog", 3)), PreviewOutcome::Skipped);
        assert_eq!(client.calls.get(), 0);
    }

    #[test]
    fn test_preview_lists_three_headlines() {
        let client = FixedClient::new(Some(
            r#"{"status":"ok","feed":{"title":"Security Weekly"},"items":[
                {"title":"a"},{"title":"b"},{"title":"c"},{"title":"d"}]}"#,
        ));
        let outcome = block_on(preview_feed(&client, "https://sec.example/rss", "", 3));

        assert!(outcome.can_save());
        assert_eq!(
            outcome,
            PreviewOutcome::Ready(FeedPreview {
                title: "Security Weekly".to_string(),
                headlines: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
        );
    }

    #[test]
    fn test_title_falls_back_to_typed_name_then_untitled() {
        let client = FixedClient::new(Some(r#"{"status":"ok","items":[]}"#));
        match block_on(preview_feed(&client, "https://x.example/rss", " My Feed ", 3)) {
            PreviewOutcome::Ready(preview) => assert_eq!(preview.title, "My Feed"),
            other => panic!("unexpected {:?}", other),
        }
        match block_on(preview_feed(&client, "https://x.example/rss", "", 3)) {
            PreviewOutcome::Ready(preview) => assert_eq!(preview.title, "Untitled"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_failure_disables_save() {
        let client = FixedClient::new(None);
        let outcome = block_on(preview_feed(&client, "https://gone.example/rss", "Gone", 3));

        assert!(!outcome.can_save());
        assert_eq!(
            outcome,
            PreviewOutcome::Failed("Could not load preview for this RSS URL. HTTP error! status: 404".to_string())
        );
    }
}
