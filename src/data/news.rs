//! Seeking Alpha news lookup.
//!
//! Fetches the latest articles for a ticker and keeps only publication
//! time and title, in the order the API returns them.
//!
//! API: `{base_url}{symbol}` (e.g. the RapidAPI `news/v2/list-by-symbol?id=` endpoint)
//! Auth: one header whose name and value come from the environment.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{NewsError, NewsLookup};
use crate::config::{AppConfig, NewsConfig};
use crate::types::NewsItem;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

// The response also carries `included` and `meta`, which are ignored.
// Items stay raw so one bad article does not sink the rest.
#[derive(Debug, Deserialize)]
struct SeekingAlphaResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeekingAlphaNews {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    #[serde(rename = "publishOn")]
    publish_on: DateTime<FixedOffset>,
    #[serde(default)]
    title: Option<String>,
}

impl From<SeekingAlphaNews> for NewsItem {
    fn from(item: SeekingAlphaNews) -> Self {
        NewsItem {
            published_at: item.attributes.publish_on,
            headline: item.attributes.title.unwrap_or_default(),
        }
    }
}

/// Decode a response body into news items, preserving order. A body
/// that is not the expected envelope is a `Decode` error; an article
/// without a readable `publishOn` is skipped on its own.
fn parse_articles(symbol: &str, body: &str) -> Result<Vec<NewsItem>, NewsError> {
    let response: SeekingAlphaResponse =
        serde_json::from_str(body).map_err(|e| NewsError::Decode {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

    let items = response
        .data
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            match serde_json::from_value::<SeekingAlphaNews>(raw) {
                Ok(item) => Some(NewsItem::from(item)),
                Err(e) => {
                    debug!(symbol, index = idx, error = %e, "Skipping undecodable article");
                    None
                }
            }
        })
        .collect();
    Ok(items)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct SeekingAlphaClient {
    http: Client,
    base_url: String,
    api_key_header: String,
    api_key: SecretString,
}

impl SeekingAlphaClient {
    /// Build a client. A zero timeout leaves requests unbounded.
    pub fn new(
        base_url: String,
        api_key_header: String,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent("GAPSCAN/0.1.0");
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build news HTTP client")?;
        Ok(Self {
            http,
            base_url,
            api_key_header,
            api_key,
        })
    }

    /// Build a client from the `[news]` section, resolving the
    /// referenced environment variables.
    pub fn from_config(cfg: &NewsConfig) -> Result<Self> {
        let base_url = AppConfig::resolve_env(&cfg.base_url_env)?;
        let api_key_header = AppConfig::resolve_env(&cfg.api_key_header_env)?;
        let api_key = SecretString::new(AppConfig::resolve_env(&cfg.api_key_env)?);
        Self::new(
            base_url,
            api_key_header,
            api_key,
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    fn url_for(&self, symbol: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(symbol))
    }
}

#[async_trait]
impl NewsLookup for SeekingAlphaClient {
    async fn fetch(&self, symbol: &str) -> Result<Vec<NewsItem>, NewsError> {
        let url = self.url_for(symbol);
        debug!(symbol, url = %url, "Fetching news");

        let resp = self
            .http
            .get(&url)
            .header(self.api_key_header.as_str(), self.api_key.expose_secret().as_str())
            .send()
            .await
            .map_err(|e| NewsError::Transport {
                symbol: symbol.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NewsError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| NewsError::Transport {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

        parse_articles(symbol, &body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
