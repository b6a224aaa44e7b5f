//! Enrichment fan-out.
//!
//! Sizes every candidate and fetches its news concurrently, then joins
//! exactly one `Selection` per dispatched candidate. Lookups run through
//! a bounded `buffer_unordered` stream, so the join completes when the
//! stream is drained rather than when a counter hits a magic number.
//!
//! A failed lookup degrades that candidate to an empty news list. It
//! never aborts the batch and never drops the candidate.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::data::{NewsError, NewsLookup};
use crate::strategy::risk::RiskPolicy;
use crate::strategy::sizing::size_position;
use crate::types::{Candidate, NewsItem, Selection};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default cap on in-flight lookups.
pub const DEFAULT_MAX_CONCURRENCY: usize = 32;

// ---------------------------------------------------------------------------
// Batch report
// ---------------------------------------------------------------------------

/// Outcome of one enrichment batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One selection per dispatched candidate, in completion order.
    pub selections: Vec<Selection>,
    /// Number of candidates dispatched.
    pub dispatched: usize,
    /// Lookups that failed and were replaced by an empty news list.
    pub lookup_failures: usize,
}

impl BatchReport {
    pub fn total_articles(&self) -> usize {
        self.selections.iter().map(|s| s.news_items.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Enricher
// ---------------------------------------------------------------------------

/// Joins sizing and news lookups for a batch of candidates.
pub struct Enricher {
    news: Arc<dyn NewsLookup>,
    policy: RiskPolicy,
    max_concurrency: usize,
    lookup_timeout: Option<Duration>,
}

impl Enricher {
    /// Create an enricher with the default concurrency cap and no
    /// per-lookup timeout beyond the lookup's own.
    pub fn new(news: Arc<dyn NewsLookup>, policy: RiskPolicy) -> Self {
        Self {
            news,
            policy,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            lookup_timeout: None,
        }
    }

    /// Cap in-flight lookups. 0 means one slot per candidate.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Bound each lookup; an expired lookup counts as a failure.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// Effective number of concurrent lookups for a batch of `n`.
    fn concurrency_for(&self, n: usize) -> usize {
        let cap = if self.max_concurrency == 0 {
            n
        } else {
            self.max_concurrency.min(n)
        };
        cap.max(1)
    }

    /// Enrich a batch of candidates.
    ///
    /// Returns once every dispatched candidate has produced exactly one
    /// selection. Output order follows completion, not input.
    pub async fn enrich_batch(&self, candidates: &[Candidate]) -> BatchReport {
        let dispatched = candidates.len();
        let concurrency = self.concurrency_for(dispatched);
        info!(count = dispatched, concurrency, "Starting batch enrichment");

        let outcomes: Vec<(Selection, bool)> = stream::iter(candidates.iter().cloned())
            .map(|candidate| self.enrich_one(candidate))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let lookup_failures = outcomes.iter().filter(|(_, failed)| *failed).count();
        let selections: Vec<Selection> = outcomes.into_iter().map(|(s, _)| s).collect();

        debug_assert_eq!(selections.len(), dispatched);

        let report = BatchReport {
            selections,
            dispatched,
            lookup_failures,
        };

        info!(
            enriched = report.selections.len(),
            lookup_failures = report.lookup_failures,
            articles = report.total_articles(),
            "Batch enrichment complete"
        );

        report
    }

    /// Size one candidate and attach its news. The flag is set when the
    /// lookup failed.
    async fn enrich_one(&self, candidate: Candidate) -> (Selection, bool) {
        let plan = size_position(candidate.gap_percent, candidate.opening_price, &self.policy);

        let (news_items, failed) = match self.lookup(&candidate.symbol).await {
            Ok(items) => {
                info!(
                    symbol = %candidate.symbol,
                    articles = items.len(),
                    "Found {} articles about {}",
                    items.len(),
                    candidate.symbol
                );
                (items, false)
            }
            Err(e) => {
                warn!(
                    symbol = %candidate.symbol,
                    error = %e,
                    "News lookup failed, using empty news"
                );
                (Vec::new(), true)
            }
        };

        let selection = Selection {
            symbol: candidate.symbol,
            plan,
            news_items,
        };
        (selection, failed)
    }

    async fn lookup(&self, symbol: &str) -> Result<Vec<NewsItem>, NewsError> {
        match self.lookup_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.news.fetch(symbol)).await {
                Ok(result) => result,
                Err(_) => Err(NewsError::Timeout {
                    symbol: symbol.to_string(),
                    millis: limit.as_millis() as u64,
                }),
            },
            None => self.news.fetch(symbol).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
