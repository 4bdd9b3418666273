use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One check's share of the weighted score.
pub struct ScoreContribution {
    pub check_name: String,
    /// Check confidence in `[0, 1]`.
    pub confidence: f64,
    /// Effective weight (`0.0` for invalid configured weights).
    pub weight: f64,
}

impl ScoreContribution {
    /// `confidence × weight`.
    pub fn weighted(&self) -> f64 {
        self.confidence * self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Weighted score with the per-check detail it was computed from.
pub struct ScoreBreakdown {
    /// `Σ(confidence × weight) / Σ(weight)`, or `0.0` when the total weight is zero.
    pub score: f64,
    pub total_weight: f64,
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreBreakdown {
    /// Score on a 0-100 scale, clamped.
    pub fn quality_score(&self) -> f64 {
        (self.score * 100.0).clamp(0.0, 100.0)
    }

    /// Contribution of `check_name`, if it was scored.
    pub fn contribution(&self, check_name: &str) -> Option<&ScoreContribution> {
        self.contributions
            .iter()
            .find(|c| c.check_name == check_name)
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "score {:.4} over {} checks (total weight {:.2})",
            self.score,
            self.contributions.len(),
            self.total_weight
        )
    }
}
