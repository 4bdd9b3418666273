//! Weighted aggregation of check results.
//!
//! [`WeightedScorer`] turns the rules engine output into a single score. The
//! same figure, scaled to 0-100, is the quality score the gate compares against
//! `approval_quality_score_threshold`.

pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use scorer::WeightedScorer;
pub use types::{ScoreBreakdown, ScoreContribution};
