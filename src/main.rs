//! GAPSCAN: opening-gap screener
//!
//! Entry point. Loads configuration and secrets, initialises structured
//! logging, then runs one load → filter → size/enrich → persist pass
//! over the day's screener export. Any fatal error exits non-zero.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use gapscan::config;
use gapscan::data::news::SeekingAlphaClient;
use gapscan::data::screener::load_screener;
use gapscan::engine::enricher::Enricher;
use gapscan::engine::{run_pipeline, RunReport};
use gapscan::storage::JsonFileSink;

const BANNER: &str = r#"
   ____    _    ____  ____   ____    _    _   _
  / ___|  / \  |  _ \/ ___| / ___|  / \  | \ | |
 | |  _  / _ \ | |_) \___ \| |     / _ \ |  \| |
 | |_| |/ ___ \|  __/ ___) | |___ / ___ \| |\  |
  \____/_/   \_\_|   |____/ \____/_/   \_\_| \_|

  Opening-gap screener: sizing + news enrichment
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path =
        std::env::var("GAPSCAN_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = config::AppConfig::load_or_default(&config_path)?;

    init_logging();

    println!("{BANNER}");

    let policy = cfg.risk_policy().context("Invalid risk policy")?;
    info!(
        account_balance = policy.account_balance(),
        loss_tolerance = policy.loss_tolerance(),
        profit_capture = policy.profit_capture(),
        max_risk_budget = policy.max_risk_budget(),
        "Risk policy loaded"
    );

    let news = SeekingAlphaClient::from_config(&cfg.news)
        .context("Failed to configure news lookup")?;

    let mut enricher = Enricher::new(Arc::new(news), policy)
        .with_max_concurrency(cfg.pipeline.max_concurrency);
    if cfg.news.timeout_secs > 0 {
        enricher = enricher.with_lookup_timeout(Duration::from_secs(cfg.news.timeout_secs));
    }

    let load = load_screener(&cfg.pipeline.input_path)?;
    let sink = JsonFileSink::new(cfg.pipeline.output_path.clone());

    let report = run_pipeline(load, &enricher, &sink)
        .await
        .with_context(|| format!("Error writing output to {}", sink.path()))?;

    log_run_report(&report);
    println!("Finished writing output to {}", sink.path());

    Ok(())
}

/// Log a human-readable run summary.
fn log_run_report(report: &RunReport) {
    info!(
        rows = report.rows_loaded,
        dropped = report.rows_dropped,
        candidates = report.candidates,
        selections = report.batch.selections.len(),
        lookup_failures = report.batch.lookup_failures,
        articles = report.batch.total_articles(),
        "Run complete"
    );
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gapscan=info"));

    let json_logging = std::env::var("GAPSCAN_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
