//! Mock news lookup for integration testing.
//!
//! Provides a deterministic `NewsLookup` implementation that returns
//! canned headlines per symbol, fails on demand, and records every
//! call. Everything is in-memory with no network.

use async_trait::async_trait;
use chrono::{DateTime, Duration};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use gapscan::data::{NewsError, NewsLookup};
use gapscan::types::NewsItem;

/// A mock news source for deterministic testing.
#[derive(Clone, Default)]
pub struct MockNews {
    articles: Arc<Mutex<HashMap<String, Vec<NewsItem>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockNews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `count` generated headlines for a symbol.
    pub fn with_articles(self, symbol: &str, count: usize) -> Self {
        let base = DateTime::parse_from_rfc3339("2024-05-01T08:30:00-04:00").unwrap();
        let items = (0..count)
            .map(|i| NewsItem {
                published_at: base - Duration::minutes(i as i64 * 15),
                headline: format!("{symbol} headline #{i}"),
            })
            .collect();
        self.articles.lock().unwrap().insert(symbol.to_string(), items);
        self
    }

    /// Make every lookup for a symbol fail with a 503.
    pub fn failing(self, symbol: &str) -> Self {
        self.failing.lock().unwrap().insert(symbol.to_string());
        self
    }

    /// Symbols looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsLookup for MockNews {
    async fn fetch(&self, symbol: &str) -> Result<Vec<NewsItem>, NewsError> {
        self.calls.lock().unwrap().push(symbol.to_string());

        if self.failing.lock().unwrap().contains(symbol) {
            return Err(NewsError::Status {
                symbol: symbol.to_string(),
                status: 503,
            });
        }

        // Yield so concurrent lookups interleave.
        tokio::task::yield_now().await;

        Ok(self
            .articles
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .unwrap_or_default())
    }
}
