//! Shared types for the GAPSCAN pipeline.
//!
//! These types form the data model used across all modules: screener
//! rows, filtered candidates, sized trade plans, news items, and the
//! enriched selections handed to the result sink.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Screener rows and candidates
// ---------------------------------------------------------------------------

/// One parsed record from the screener export.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerRow {
    pub symbol: String,
    /// Opening gap as a fraction (0.15 = +15%)
    pub gap_percent: f64,
    pub opening_price: f64,
}

/// A screener row whose gap passed the materiality threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub symbol: String,
    pub gap_percent: f64,
    pub opening_price: f64,
}

impl From<ScreenerRow> for Candidate {
    fn from(row: ScreenerRow) -> Self {
        Self {
            symbol: row.symbol,
            gap_percent: row.gap_percent,
            opening_price: row.opening_price,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (gap: {:+.1}% | open: ${:.2})",
            self.symbol,
            self.gap_percent * 100.0,
            self.opening_price,
        )
    }
}

// ---------------------------------------------------------------------------
// Trade plan
// ---------------------------------------------------------------------------

/// Risk-bounded entry/exit plan for one candidate.
///
/// Prices and expected profit are rounded to cents. The share count is
/// derived from the unrounded stop distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
    pub share_count: u64,
    pub expected_profit: f64,
}

impl TradePlan {
    /// A plan that takes no position: exits at the entry, zero shares.
    pub fn flat(entry_price: f64) -> Self {
        Self {
            entry_price,
            stop_loss_price: entry_price,
            take_profit_price: entry_price,
            share_count: 0,
            expected_profit: 0.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_flat(&self) -> bool {
        self.share_count == 0
    }
}

impl fmt::Display for TradePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry ${:.2} | stop ${:.2} | target ${:.2} | {} shares | exp ${:.2}",
            self.entry_price,
            self.stop_loss_price,
            self.take_profit_price,
            self.share_count,
            self.expected_profit,
        )
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// A headline attached to a selection, kept verbatim and unranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Publication time with the provider's original offset.
    pub published_at: DateTime<FixedOffset>,
    pub headline: String,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A candidate joined with its trade plan and news. Built once per
/// dispatched candidate and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub symbol: String,
    #[serde(flatten)]
    pub plan: TradePlan,
    #[serde(default)]
    pub news_items: Vec<NewsItem>,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} | {} articles", self.symbol, self.plan, self.news_items.len())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for GAPSCAN.
#[derive(Debug, thiserror::Error)]
pub enum GapscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Screener error ({path}): {message}")]
    Screener { path: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
