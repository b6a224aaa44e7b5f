//! Persistence layer.
//!
//! Writes the enriched selections for a run as one JSON array, in a
//! single write after the batch completes, and reads them back for
//! review.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::types::{GapscanError, Selection};

/// Destination for a completed batch. Failure is fatal to the run.
pub trait ResultSink: Send + Sync {
    fn persist(&self, batch: &[Selection]) -> Result<()>;
}

/// Writes the whole batch to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: String,
}

impl JsonFileSink {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&self, batch: &[Selection]) -> Result<()> {
        let path = self.path.as_str();
        let json = serde_json::to_string_pretty(batch)
            .context("Failed to serialise selections")?;

        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write selections to {path}"))?;

        info!(path, selections = batch.len(), "Selections written");
        Ok(())
    }
}

/// Load a previously persisted batch.
pub fn load_selections(path: &str) -> Result<Vec<Selection>> {
    if !Path::new(path).exists() {
        return Err(GapscanError::Storage(format!("No output file at {path}")).into());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read selections from {path}"))?;

    let selections: Vec<Selection> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse selections from {path}"))?;

    debug!(path, selections = selections.len(), "Selections loaded");
    Ok(selections)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
