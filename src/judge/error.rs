//! Semantic judge error types.

use thiserror::Error;

/// Errors returned by a [`SemanticJudge`](super::SemanticJudge).
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The judge could not be reached or refused the request.
    #[error("semantic judge unavailable: {message}")]
    Unavailable { message: String },

    /// The judge answered with something that is not a verdict.
    #[error("invalid semantic judge response: {message}")]
    InvalidResponse { message: String },

    /// The caller-side timeout elapsed first.
    #[error("semantic judge timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

/// Result type for judge calls.
pub type JudgeResult<T> = Result<T, JudgeError>;
