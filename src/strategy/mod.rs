//! Strategy: gap materiality filter, risk policy, and position sizing.

pub mod filter;
pub mod risk;
pub mod sizing;

pub use filter::{filter_candidates, MIN_GAP};
pub use risk::RiskPolicy;
pub use sizing::size_position;
