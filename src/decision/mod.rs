//! Invocation decision: should the semantic judge be consulted?
//!
//! Four strategies, selected by [`InvocationMode`]:
//!
//! | Mode | Invokes when |
//! |------|--------------|
//! | `Binary` | every check passed |
//! | `Percentage` | pass rate (0-100) `>=` threshold |
//! | `Weighted` | weighted pass ratio (0-1) `>=` threshold |
//! | `Range` | `min < pass rate < max` |
//!
//! Warnings count as "not passed" in every mode.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::{InvocationDecisionEngine, summarize};
pub use error::{DecisionError, DecisionResult};
pub use types::{
    InvocationDecision, InvocationMode, InvocationModeKind, InvocationSettings, RuleOutcome,
    RulesSummary, ThresholdUsed,
};
