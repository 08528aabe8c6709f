//! Feed Aggregation
//!
//! One request per source, all in flight together. A failing source becomes a
//! placeholder card; the result is ready once every request has settled.

use futures::future::join_all;

use super::client::{FeedClient, FeedDocument};
use crate::models::{CustomFeedSource, FeedSource};

/// One source's slot in the aggregated view
#[derive(Debug, Clone, PartialEq)]
pub enum FeedCard {
    Loaded { source: FeedSource, feed: FeedDocument },
    /// "Could not load feed." placeholder
    Unavailable { source: FeedSource, reason: String },
}

impl FeedCard {
    pub fn source(&self) -> &FeedSource {
        match self {
            FeedCard::Loaded { source, .. } | FeedCard::Unavailable { source, .. } => source,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FeedCard::Unavailable { .. })
    }
}

/// Custom sources first, then the built-in ones
pub fn combined_sources(custom: &[CustomFeedSource], builtin: &[FeedSource]) -> Vec<FeedSource> {
    custom
        .iter()
        .map(FeedSource::from)
        .chain(builtin.iter().cloned())
        .collect()
}

/// Fetch and normalize a single source. Never fails: errors become a placeholder.
pub async fn load_feed<C>(client: &C, source: &FeedSource, max_items: usize) -> FeedCard
where
    C: FeedClient + ?Sized,
{
    let result = match client.fetch(&source.rss_url).await {
        Ok(response) => response.into_document(&source.name, max_items),
        Err(e) => Err(e),
    };

    match result {
        Ok(feed) => FeedCard::Loaded {
            source: source.clone(),
            feed,
        },
        Err(e) => {
            log::error!("[FEEDS] Failed to load feed from {}: {}", source.name, e);
            FeedCard::Unavailable {
                source: source.clone(),
                reason: e.to_string(),
            }
        }
    }
}

/// Fetch every source concurrently and return the cards in source order
pub async fn aggregate<C>(client: &C, sources: &[FeedSource], max_items: usize) -> Vec<FeedCard>
where
    C: FeedClient + ?Sized,
{
    let cards = join_all(sources.iter().map(|source| load_feed(client, source, max_items))).await;
    let failed = cards.iter().filter(|card| card.is_unavailable()).count();
    log::info!("[FEEDS] Loaded {} feeds ({} unavailable)", cards.len(), failed);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::error::FeedError;
    use crate::feeds::client::FeedResponse;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use futures::future::poll_fn;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::task::Poll;

    /// Replies from a fixed table, counting every request
    struct ScriptedClient {
        replies: HashMap<String, Result<String, u16>>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<(&str, Result<&str, u16>)>) -> Self {
            Self {
                replies: replies
                    .into_iter()
                    .map(|(url, reply)| (url.to_string(), reply.map(str::to_string)))
                    .collect(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl FeedClient for ScriptedClient {
        async fn fetch(&self, rss_url: &str) -> Result<FeedResponse, FeedError> {
            self.requests.borrow_mut().push(rss_url.to_string());
            match self.replies.get(rss_url) {
                Some(Ok(body)) => serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string())),
                Some(Err(status)) => Err(FeedError::Status(*status)),
                None => Err(FeedError::Transport("connection refused".to_string())),
            }
        }
    }

    /// Each reply is held back until every later source has replied, so the
    /// requests finish in reverse order when they are in flight together
    struct ReverseOrderClient {
        urls: Vec<String>,
        events: RefCell<Vec<String>>,
        finished: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl FeedClient for ReverseOrderClient {
        async fn fetch(&self, rss_url: &str) -> Result<FeedResponse, FeedError> {
            self.events.borrow_mut().push(format!("start {}", rss_url));
            let position = self.urls.iter().position(|url| url == rss_url).unwrap_or(0);
            let later = self.urls.len() - 1 - position;
            // bounded so a sequential caller still finishes, in the wrong order
            let mut polls = 0;
            poll_fn(|cx| {
                polls += 1;
                if self.finished.get() >= later || polls > 100 {
                    Poll::Ready(())
                } else {
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            })
            .await;
            self.finished.set(self.finished.get() + 1);
            self.events.borrow_mut().push(format!("done {}", rss_url));
            serde_json::from_str(OK_BODY).map_err(|e| FeedError::Decode(e.to_string()))
        }
    }

    const OK_BODY: &str = r#"{"status":"ok","feed":{"title":"Feed","link":"https://feed.example"},
        "items":[{"title":"One","link":"https://feed.example/1","pubDate":"2024-01-02 08:00:00"}]}"#;

    fn source(name: &str, url: &str) -> FeedSource {
        FeedSource::builtin(name, url, "")
    }

    #[test]
    fn test_one_failing_source_degrades_alone() {
        let client = ScriptedClient::new(vec![
            ("https://a.example/rss", Ok(OK_BODY)),
            ("https://b.example/rss", Err(503)),
            ("https://c.example/rss", Ok(OK_BODY)),
        ]);
        let sources = vec![
            source("A", "https://a.example/rss"),
            source("B", "https://b.example/rss"),
            source("C", "https://c.example/rss"),
        ];

        let cards = block_on(aggregate(&client, &sources, 5));

        assert_eq!(cards.len(), 3);
        assert_eq!(cards.iter().filter(|c| c.is_unavailable()).count(), 1);
        assert!(cards[1].is_unavailable());
        assert_eq!(cards[1].source().name, "B");
        assert_eq!(client.requests.borrow().len(), 3);
    }

    #[test]
    fn test_api_error_and_malformed_body_become_placeholders() {
        let client = ScriptedClient::new(vec![
            ("https://a.example/rss", Ok(r#"{"status":"error","message":"Not a feed"}"#)),
            ("https://b.example/rss", Ok("<html>oops</html>")),
        ]);
        let sources = vec![source("A", "https://a.example/rss"), source("B", "https://b.example/rss")];

        let cards = block_on(aggregate(&client, &sources, 5));

        match &cards[0] {
            FeedCard::Unavailable { reason, .. } => assert_eq!(reason, "API Error: Not a feed"),
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert!(cards[1].is_unavailable());
    }

    #[test]
    fn test_custom_sources_come_first() {
        let custom = vec![CustomFeedSource {
            id: "cf_1".to_string(),
            name: "Mine".to_string(),
            rss_url: "https://mine.example/rss".to_string(),
            icon: String::new(),
        }];
        let builtin = FeedConfig::default().builtin_sources;

        let sources = combined_sources(&custom, &builtin);

        assert_eq!(sources.len(), builtin.len() + 1);
        assert_eq!(sources[0].name, "Mine");
        assert_eq!(sources[0].custom_id(), Some("cf_1"));
        assert_eq!(sources[1].custom_id(), None);
        assert_eq!(sources[1].name, "Krebs on Security");
    }

    #[test]
    fn test_requests_run_together_and_cards_keep_source_order() {
        let urls = ["https://a.example/rss", "https://b.example/rss", "https://c.example/rss"];
        let client = ReverseOrderClient {
            urls: urls.iter().map(|url| url.to_string()).collect(),
            events: RefCell::new(Vec::new()),
            finished: Cell::new(0),
        };
        let sources: Vec<FeedSource> = ["A", "B", "C"]
            .iter()
            .zip(urls)
            .map(|(name, url)| source(name, url))
            .collect();

        let cards = block_on(aggregate(&client, &sources, 5));

        let events = client.events.borrow();
        let first_done = events.iter().position(|e| e.starts_with("done")).unwrap();
        assert_eq!(events.iter().filter(|e| e.starts_with("start")).count(), 3);
        assert!(events[..first_done].iter().all(|e| e.starts_with("start")));
        let done: Vec<&str> = events.iter().filter(|e| e.starts_with("done")).map(String::as_str).collect();
        assert_eq!(
            done,
            vec!["done https://c.example/rss", "done https://b.example/rss", "done https://a.example/rss"]
        );

        let names: Vec<&str> = cards.iter().map(|card| card.source().name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(cards.iter().all(|card| !card.is_unavailable()));
    }

    #[test]
    fn test_empty_source_list() {
        let client = ScriptedClient::new(vec![]);
        assert!(block_on(aggregate(&client, &[], 5)).is_empty());
    }
}
