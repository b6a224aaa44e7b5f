//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a missing file runs with the stock
//! risk policy. Secrets (news endpoint and credentials) are referenced
//! by env-var name in the config and resolved at runtime.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::strategy::risk::RiskPolicy;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RiskConfig {
    pub account_balance: f64,
    /// Fraction of the balance that may be lost on a single trade.
    pub loss_tolerance: f64,
    /// Fraction of the gap targeted as profit.
    pub profit_capture: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            account_balance: 10_000.0,
            loss_tolerance: 0.2,
            profit_capture: 0.8,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NewsConfig {
    /// Env var holding the lookup URL prefix; the symbol is appended.
    pub base_url_env: String,
    /// Env var holding the auth header name.
    pub api_key_header_env: String,
    /// Env var holding the auth header value.
    pub api_key_env: String,
    /// HTTP timeout per lookup. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url_env: "SEEKING_ALPHA_URL".to_string(),
            api_key_header_env: "API_KEY_HEADER".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: String,
    pub output_path: String,
    /// Maximum in-flight enrichments. 0 means one per candidate.
    pub max_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: "./opg.csv".to_string(),
            output_path: "./opg.json".to_string(),
            max_concurrency: 32,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Build the validated, immutable risk policy.
    pub fn risk_policy(&self) -> Result<RiskPolicy> {
        let policy = RiskPolicy::new(
            self.risk.account_balance,
            self.risk.loss_tolerance,
            self.risk.profit_capture,
        )?;
        Ok(policy)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.risk.account_balance, 10_000.0);
        assert_eq!(cfg.risk.loss_tolerance, 0.2);
        assert_eq!(cfg.risk.profit_capture, 0.8);
        assert_eq!(cfg.news.base_url_env, "SEEKING_ALPHA_URL");
        assert_eq!(cfg.news.api_key_header_env, "API_KEY_HEADER");
        assert_eq!(cfg.news.api_key_env, "API_KEY");
        assert_eq!(cfg.pipeline.input_path, "./opg.csv");
        assert_eq!(cfg.pipeline.output_path, "./opg.json");
        assert_eq!(cfg.pipeline.max_concurrency, 32);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [risk]
            account_balance = 25000.0

            [pipeline]
            max_concurrency = 0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.risk.account_balance, 25_000.0);
        assert_eq!(cfg.risk.loss_tolerance, 0.2);
        assert_eq!(cfg.pipeline.max_concurrency, 0);
        assert_eq!(cfg.pipeline.output_path, "./opg.json");
        assert_eq!(cfg.news.timeout_secs, 15);
    }

    #[test]
    fn test_risk_policy_from_config() {
        let cfg = AppConfig::default();
        let policy = cfg.risk_policy().unwrap();
        assert!((policy.max_risk_budget() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_risk_policy_rejected() {
        let cfg = AppConfig::from_toml("[risk]\nprofit_capture = 0.0\n").unwrap();
        assert!(cfg.risk_policy().is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(AppConfig::from_toml("[risk\naccount_balance = ").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = AppConfig::load_or_default("/tmp/gapscan_missing_config_xyz.toml").unwrap();
        assert_eq!(cfg.pipeline.max_concurrency, 32);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[news]\ntimeout_secs = 5\n").unwrap();
        let cfg = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.news.timeout_secs, 5);
    }

    #[test]
    fn test_resolve_env_missing() {
        assert!(AppConfig::resolve_env("GAPSCAN_DEFINITELY_UNSET_VAR").is_err());
    }
}
