use std::collections::HashMap;

use tracing::{debug, warn};

use super::types::{ScoreBreakdown, ScoreContribution};
use crate::constants::DEFAULT_RULE_WEIGHT;
use crate::rules::{CheckResult, clamp_confidence};

/// Combines check results into one confidence-weighted score.
///
/// `score = Σ(confidence_i × weight_i) / Σ(weight_i)` over every result. A
/// check missing from the weight map uses the default weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScorer {
    default_weight: f64,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_RULE_WEIGHT,
        }
    }
}

impl WeightedScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `weight` for checks absent from the weight map.
    pub fn with_default_weight(default_weight: f64) -> Self {
        Self { default_weight }
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Weighted score in `[0, 1]`; `0.0` when the total weight is zero.
    pub fn score(&self, results: &[CheckResult], weights: &HashMap<String, f64>) -> f64 {
        self.breakdown(results, weights).score
    }

    /// [`score`](Self::score) on a 0-100 scale.
    pub fn quality_score(&self, results: &[CheckResult], weights: &HashMap<String, f64>) -> f64 {
        self.breakdown(results, weights).quality_score()
    }

    /// Score plus the per-check contributions behind it.
    pub fn breakdown(
        &self,
        results: &[CheckResult],
        weights: &HashMap<String, f64>,
    ) -> ScoreBreakdown {
        let contributions: Vec<ScoreContribution> = results
            .iter()
            .map(|r| ScoreContribution {
                check_name: r.check_name.clone(),
                confidence: clamp_confidence(r.confidence_score),
                weight: self.effective_weight(&r.check_name, weights),
            })
            .collect();

        let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
        let weighted: f64 = contributions.iter().map(ScoreContribution::weighted).sum();

        let score = if total_weight > 0.0 {
            clamp_confidence(weighted / total_weight)
        } else {
            0.0
        };

        debug!(
            checks = contributions.len(),
            total_weight, score, "Weighted score computed"
        );

        ScoreBreakdown {
            score,
            total_weight,
            contributions,
        }
    }

    fn effective_weight(&self, check_name: &str, weights: &HashMap<String, f64>) -> f64 {
        let weight = weights
            .get(check_name)
            .copied()
            .unwrap_or(self.default_weight);

        if weight.is_finite() && weight >= 0.0 {
            weight
        } else {
            warn!(check = check_name, weight, "Ignoring invalid rule weight");
            0.0
        }
    }
}
