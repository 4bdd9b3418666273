use std::fmt;

use serde::Serialize;

use crate::decision::InvocationDecision;
use crate::judge::JudgeVerdict;
use crate::rules::CheckResult;
use crate::scoring::ScoreBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalVerdict {
    Approved,
    Flagged,
    /// The judge was wanted but gave no usable answer, or the judge and the
    /// rules disagree.
    NeedsReview,
}

impl FinalVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            FinalVerdict::Approved => "approved",
            FinalVerdict::Flagged => "flagged",
            FinalVerdict::NeedsReview => "needs_review",
        }
    }
}

impl fmt::Display for FinalVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Everything the gate learned about one submission.
pub struct GateOutcome {
    /// `content_fingerprint` and `hash_tags`, hex encoded, joined by `-`.
    pub submission_id: String,
    pub results: Vec<CheckResult>,
    pub score: ScoreBreakdown,
    /// `score` on a 0-100 scale.
    pub quality_score: f64,
    pub decision: InvocationDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_verdict: Option<JudgeVerdict>,
    /// Why the judge gave no verdict when one was wanted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_error: Option<String>,
    pub final_verdict: FinalVerdict,
    pub processing_time_ms: f64,
}

impl GateOutcome {
    pub fn judge_consulted(&self) -> bool {
        self.judge_verdict.is_some() || self.judge_error.is_some()
    }

    pub fn is_approved(&self) -> bool {
        self.final_verdict == FinalVerdict::Approved
    }
}
