//! External data sources.
//!
//! Defines the `NewsLookup` trait consumed by the enricher, the
//! Seeking Alpha implementation, and the screener export loader.

pub mod news;
pub mod screener;

use async_trait::async_trait;

use crate::types::NewsItem;

/// Why a news lookup produced no articles.
///
/// The enricher treats every kind the same way: log it and continue
/// with an empty news list.
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("News transport error ({symbol}): {message}")]
    Transport { symbol: String, message: String },

    #[error("Unsuccessful response code - {status} received ({symbol})")]
    Status { symbol: String, status: u16 },

    #[error("Malformed news body ({symbol}): {message}")]
    Decode { symbol: String, message: String },

    #[error("News lookup timed out after {millis}ms ({symbol})")]
    Timeout { symbol: String, millis: u64 },
}

/// Abstraction over per-symbol news sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsLookup: Send + Sync {
    /// Fetch recent articles for a symbol, in provider order.
    async fn fetch(&self, symbol: &str) -> Result<Vec<NewsItem>, NewsError>;
}
