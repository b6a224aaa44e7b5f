//! Gap materiality filter.

use tracing::debug;

use crate::types::{Candidate, ScreenerRow};

/// Minimum absolute gap (10%) for a row to become a candidate.
pub const MIN_GAP: f64 = 0.10;

/// Whether a gap is large enough to trade.
pub fn is_material(gap_percent: f64) -> bool {
    gap_percent.abs() >= MIN_GAP
}

/// Keep rows whose absolute gap meets [`MIN_GAP`], preserving order.
pub fn filter_candidates(rows: Vec<ScreenerRow>) -> Vec<Candidate> {
    rows.into_iter()
        .filter(|row| {
            let keep = is_material(row.gap_percent);
            if !keep {
                debug!(symbol = %row.symbol, gap = row.gap_percent, "Gap below threshold");
            }
            keep
        })
        .map(Candidate::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, gap: f64, open: f64) -> ScreenerRow {
        ScreenerRow {
            symbol: symbol.to_string(),
            gap_percent: gap,
            opening_price: open,
        }
    }

    #[test]
    fn test_small_gap_dropped_regardless_of_price() {
        for open in [0.5, 10.0, 5_000.0] {
            assert!(filter_candidates(vec![row("LOW", 0.05, open)]).is_empty());
        }
    }

    #[test]
    fn test_threshold_inclusive() {
        let out = filter_candidates(vec![row("EDGE", 0.10, 10.0), row("NEG", -0.10, 10.0)]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_negative_gaps_use_magnitude() {
        let out = filter_candidates(vec![row("DOWN", -0.25, 10.0), row("FLAT", -0.099, 10.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "DOWN");
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            row("A", 0.3, 1.0),
            row("B", 0.01, 1.0),
            row("C", -0.2, 1.0),
            row("D", 0.11, 1.0),
        ];
        let symbols: Vec<_> = filter_candidates(rows).into_iter().map(|c| c.symbol).collect();
        assert_eq!(symbols, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_duplicate_rows_each_kept() {
        let out = filter_candidates(vec![row("X", 0.2, 5.0), row("X", 0.2, 5.0)]);
        assert_eq!(out.len(), 2);
    }
}
