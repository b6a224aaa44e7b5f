//! Risk policy.
//!
//! Fixed per-process limits that bound every trade plan: account
//! balance, tolerated loss fraction, and the share of the gap targeted
//! as profit. Built once at startup and copied into each enrichment.

use crate::types::GapscanError;

/// Immutable risk limits shared by all sizing calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskPolicy {
    account_balance: f64,
    loss_tolerance: f64,
    profit_capture: f64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            account_balance: 10_000.0,
            loss_tolerance: 0.2,
            profit_capture: 0.8,
        }
    }
}

impl RiskPolicy {
    /// Validate and build a policy.
    ///
    /// Rejects non-positive balances, loss tolerances outside (0, 1],
    /// and non-positive profit capture. A zero profit capture would make
    /// the stop distance zero for every candidate.
    pub fn new(
        account_balance: f64,
        loss_tolerance: f64,
        profit_capture: f64,
    ) -> Result<Self, GapscanError> {
        if !account_balance.is_finite() || account_balance <= 0.0 {
            return Err(GapscanError::Config(format!(
                "account_balance must be positive, got {account_balance}"
            )));
        }
        if !loss_tolerance.is_finite() || loss_tolerance <= 0.0 || loss_tolerance > 1.0 {
            return Err(GapscanError::Config(format!(
                "loss_tolerance must be in (0, 1], got {loss_tolerance}"
            )));
        }
        if !profit_capture.is_finite() || profit_capture <= 0.0 {
            return Err(GapscanError::Config(format!(
                "profit_capture must be positive, got {profit_capture}"
            )));
        }
        Ok(Self {
            account_balance,
            loss_tolerance,
            profit_capture,
        })
    }

    pub fn account_balance(&self) -> f64 {
        self.account_balance
    }

    pub fn loss_tolerance(&self) -> f64 {
        self.loss_tolerance
    }

    pub fn profit_capture(&self) -> f64 {
        self.profit_capture
    }

    /// Maximum loss tolerated on a single trade.
    pub fn max_risk_budget(&self) -> f64 {
        self.account_balance * self.loss_tolerance
    }
}
