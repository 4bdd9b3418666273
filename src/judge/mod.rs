//! The external semantic judge, consumed as an abstract capability.
//!
//! The core never calls a judge. The [`QualityGate`](crate::pipeline::QualityGate)
//! does, and only when the invocation decision says so.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{JudgeError, JudgeResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSemanticJudge;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::rules::clamp_confidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// The judge's overall call on tag/content alignment.
pub enum JudgeAssessment {
    Accurate,
    Inaccurate,
    /// No clear call; the confidence decides.
    Uncertain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A judge's answer for one submission.
pub struct JudgeVerdict {
    pub assessment: JudgeAssessment,
    /// Clamped to `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_tags: Vec<String>,
}

impl JudgeVerdict {
    pub fn new(assessment: JudgeAssessment, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            assessment,
            confidence: clamp_confidence(confidence),
            reasoning: reasoning.into(),
            suggested_tags: Vec::new(),
        }
    }

    pub fn with_suggested_tags(mut self, tags: Vec<String>) -> Self {
        self.suggested_tags = tags;
        self
    }

    /// Whether the verdict accepts the tags at `confidence_threshold`.
    ///
    /// `Accurate` and `Inaccurate` are final; `Uncertain` passes when the
    /// confidence reaches the threshold.
    pub fn accepts(&self, confidence_threshold: f64) -> bool {
        match self.assessment {
            JudgeAssessment::Accurate => true,
            JudgeAssessment::Inaccurate => false,
            JudgeAssessment::Uncertain => self.confidence >= confidence_threshold,
        }
    }
}

#[async_trait]
/// Higher-cost assessment of how well tags describe the content.
pub trait SemanticJudge: Send + Sync {
    /// Judges `tags` against `content`.
    async fn judge(&self, content: &str, tags: &[String]) -> JudgeResult<JudgeVerdict>;
}
