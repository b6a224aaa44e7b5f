//! Opening-gap position sizing.
//!
//! Converts a gap and an opening price into entry, stop-loss and
//! take-profit levels plus a share count bounded by the risk budget.
//!
//! The stop sits `profit_capture * gap_value` away from the open on one
//! side and the target the same distance on the other, where
//! `gap_value = implied_prior_close - opening_price`. The sign follows
//! the gap, so an up-gap yields a stop above the entry (a short bet on
//! reversion) and a down-gap a stop below it.

use tracing::{debug, warn};

use super::risk::RiskPolicy;
use crate::types::TradePlan;

/// Round to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Size a trade plan for one gap.
///
/// Total over finite inputs: when the stop distance is zero or not
/// finite (zero gap, or a gap at or below -100%) the result is a flat
/// plan with no shares.
pub fn size_position(gap_percent: f64, opening_price: f64, policy: &RiskPolicy) -> TradePlan {
    let implied_prior_close = opening_price / (1.0 + gap_percent);
    let gap_value = implied_prior_close - opening_price;
    let profit_from_gap = policy.profit_capture() * gap_value;

    let stop_loss = opening_price - profit_from_gap;
    let take_profit = opening_price + profit_from_gap;

    let risk_per_share = (stop_loss - opening_price).abs();
    if !risk_per_share.is_finite() || risk_per_share == 0.0 {
        warn!(
            gap_percent,
            opening_price,
            risk_per_share,
            "Degenerate stop distance, returning flat plan"
        );
        return TradePlan::flat(round_cents(opening_price));
    }

    let shares = (policy.max_risk_budget() / risk_per_share).floor();
    // Budget and distance are both positive here; the cast saturates.
    let share_count = shares.max(0.0) as u64;

    let expected_profit = round_cents((opening_price - take_profit).abs() * share_count as f64);

    debug!(
        gap = format!("{:+.2}%", gap_percent * 100.0),
        prior_close = format!("${:.2}", implied_prior_close),
        risk_per_share = format!("${:.4}", risk_per_share),
        share_count,
        "Position sized"
    );

    TradePlan {
        entry_price: round_cents(opening_price),
        stop_loss_price: round_cents(stop_loss),
        take_profit_price: round_cents(take_profit),
        share_count,
        expected_profit,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
