//! The quality-check catalog and the engine that runs it.
//!
//! [`RulesEngine::check`] evaluates eleven independent checks against one
//! submission and returns one [`CheckResult`] per check, in catalog order.
//!
//! # Architecture
//!
//! ```text
//! (content, tags)
//!       │
//!       ▼
//! ThresholdSnapshot ◄── ConfigStore
//!       │
//!       ▼
//! checks 1..=11 ──► SimilarityEngine / DomainLexicon / DuplicateTracker
//!       │
//!       ▼
//! catalog invariant ──► Vec<CheckResult>
//! ```
//!
//! A check that errors or panics yields a failing result with an `error`
//! metadata entry instead of aborting the run.

pub mod checks;
pub mod duplicate;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod thresholds;
pub mod types;

#[cfg(test)]
mod tests;

pub use checks::{CATALOG, CheckContext, CheckFn, CheckSpec, category_of};
pub use duplicate::{DuplicateObservation, DuplicateTracker};
pub use engine::RulesEngine;
pub use error::{RuleError, RuleResult};
pub use lexicon::{Domain, DomainLexicon};
pub use metrics::EngineMetrics;
pub use thresholds::ThresholdSnapshot;
pub use types::{CheckResult, CheckStatus, RuleCategory, Severity, clamp_confidence};
