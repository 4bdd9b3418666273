use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
/// Invalid invocation settings.
pub enum DecisionError {
    /// Range bounds must satisfy `0 <= min < max <= 100`.
    #[error("invalid range thresholds: min {min} must be below max {max} within [0, 100]")]
    InvalidRange { min: f64, max: f64 },

    /// A mode threshold is non-finite or outside its scale.
    #[error("invalid {mode} threshold {value}: must be within [0, {upper}]")]
    InvalidThreshold {
        mode: &'static str,
        value: f64,
        upper: f64,
    },

    /// A rule weight is negative or non-finite.
    #[error("invalid weight {weight} for rule '{rule}'")]
    InvalidWeight { rule: String, weight: f64 },
}

pub type DecisionResult<T> = Result<T, DecisionError>;
