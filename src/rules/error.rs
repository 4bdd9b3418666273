//! Rule check error types.

use thiserror::Error;

/// Errors raised inside a single check.
///
/// The rules engine never propagates these. Each one is turned into a failing
/// [`CheckResult`](super::CheckResult) carrying the message under `error`.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A threshold has neither a configured nor a built-in value.
    #[error("threshold '{name}' is not configured")]
    MissingThreshold { name: String },

    /// A lower bound is configured above its upper bound.
    #[error("inconsistent bounds for {check}: {min_name}={min} exceeds {max_name}={max}")]
    InconsistentBounds {
        check: &'static str,
        min_name: &'static str,
        min: f64,
        max_name: &'static str,
        max: f64,
    },

    /// The duplicate window cannot be represented as a duration.
    #[error("invalid duplicate window: {hours} hours")]
    InvalidWindow { hours: f64 },
}

/// Result type for rule checks.
pub type RuleResult<T> = Result<T, RuleError>;
