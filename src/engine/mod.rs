//! Core engine: the load → filter → enrich → persist pipeline.

pub mod enricher;

use anyhow::Result;
use tracing::info;

use crate::data::screener::ScreenerLoad;
use crate::storage::ResultSink;
use crate::strategy::filter::filter_candidates;
use enricher::{BatchReport, Enricher};

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub candidates: usize,
    pub batch: BatchReport,
}

/// Filter the screener rows, enrich the survivors, and hand the full
/// batch to the sink. A sink failure is returned to the caller.
pub async fn run_pipeline(
    load: ScreenerLoad,
    enricher: &Enricher,
    sink: &dyn ResultSink,
) -> Result<RunReport> {
    let rows_loaded = load.rows.len();
    let rows_dropped = load.dropped;

    let candidates = filter_candidates(load.rows);
    info!(
        rows = rows_loaded,
        dropped = rows_dropped,
        candidates = candidates.len(),
        "Candidates selected"
    );

    let batch = enricher.enrich_batch(&candidates).await;
    sink.persist(&batch.selections)?;

    Ok(RunReport {
        rows_loaded,
        rows_dropped,
        candidates: candidates.len(),
        batch,
    })
}
