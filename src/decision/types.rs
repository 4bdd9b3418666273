use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{DecisionError, DecisionResult};
use crate::constants::DEFAULT_RULE_WEIGHT;
use crate::rules::CheckStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Name of an invocation strategy, without its thresholds.
pub enum InvocationModeKind {
    #[default]
    Binary,
    Percentage,
    Weighted,
    Range,
}

impl InvocationModeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InvocationModeKind::Binary => "binary",
            InvocationModeKind::Percentage => "percentage",
            InvocationModeKind::Weighted => "weighted",
            InvocationModeKind::Range => "range",
        }
    }

    /// Parses a mode name case-insensitively. Unknown names fall back to `Binary`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "binary" => InvocationModeKind::Binary,
            "percentage" => InvocationModeKind::Percentage,
            "weighted" => InvocationModeKind::Weighted,
            "range" => InvocationModeKind::Range,
            other => {
                warn!(mode = other, "Unknown invocation mode; using binary");
                InvocationModeKind::Binary
            }
        }
    }
}

impl fmt::Display for InvocationModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
/// Invocation strategy together with the thresholds it needs.
pub enum InvocationMode {
    /// Invoke only when every check passed.
    #[default]
    Binary,
    /// Invoke when the pass rate (0-100) reaches `threshold`.
    Percentage { threshold: f64 },
    /// Invoke when the weighted pass ratio (0-1) reaches `threshold`.
    Weighted { threshold: f64 },
    /// Invoke only for pass rates strictly between `min` and `max` (0-100).
    Range { min: f64, max: f64 },
}

impl InvocationMode {
    pub fn kind(&self) -> InvocationModeKind {
        match self {
            InvocationMode::Binary => InvocationModeKind::Binary,
            InvocationMode::Percentage { .. } => InvocationModeKind::Percentage,
            InvocationMode::Weighted { .. } => InvocationModeKind::Weighted,
            InvocationMode::Range { .. } => InvocationModeKind::Range,
        }
    }

    /// Checks thresholds against each mode's scale.
    pub fn validate(&self) -> DecisionResult<()> {
        match *self {
            InvocationMode::Binary => Ok(()),
            InvocationMode::Percentage { threshold } => {
                check_scale("percentage", threshold, 100.0)
            }
            InvocationMode::Weighted { threshold } => check_scale("weighted", threshold, 1.0),
            InvocationMode::Range { min, max } => {
                let in_scale = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
                if in_scale(min) && in_scale(max) && min < max {
                    Ok(())
                } else {
                    Err(DecisionError::InvalidRange { min, max })
                }
            }
        }
    }

    /// Threshold(s) the mode compares against.
    pub fn threshold_used(&self) -> ThresholdUsed {
        match *self {
            InvocationMode::Binary => ThresholdUsed::None,
            InvocationMode::Percentage { threshold } | InvocationMode::Weighted { threshold } => {
                ThresholdUsed::Value(threshold)
            }
            InvocationMode::Range { min, max } => ThresholdUsed::Range { min, max },
        }
    }
}

fn check_scale(mode: &'static str, value: f64, upper: f64) -> DecisionResult<()> {
    if value.is_finite() && (0.0..=upper).contains(&value) {
        Ok(())
    } else {
        Err(DecisionError::InvalidThreshold { mode, value, upper })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Validated strategy plus the rule weights used by weighted mode.
pub struct InvocationSettings {
    mode: InvocationMode,
    rule_weights: HashMap<String, f64>,
}

impl InvocationSettings {
    /// Builds settings, rejecting out-of-scale thresholds, `min >= max` ranges,
    /// and negative or non-finite weights.
    pub fn new(mode: InvocationMode, rule_weights: HashMap<String, f64>) -> DecisionResult<Self> {
        mode.validate()?;
        if let Some((rule, weight)) = rule_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(DecisionError::InvalidWeight {
                rule: rule.clone(),
                weight: *weight,
            });
        }

        Ok(Self { mode, rule_weights })
    }

    pub fn mode(&self) -> InvocationMode {
        self.mode
    }

    pub fn rule_weights(&self) -> &HashMap<String, f64> {
        &self.rule_weights
    }

    /// Weight of `rule`, or `1.0` when it has none.
    pub fn weight_for(&self, rule: &str) -> f64 {
        self.rule_weights
            .get(rule)
            .copied()
            .unwrap_or(DEFAULT_RULE_WEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdUsed {
    None,
    Value(f64),
    Range { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-rule line of a [`RulesSummary`].
pub struct RuleOutcome {
    pub name: String,
    pub status: CheckStatus,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Counts and per-rule detail for one evaluation.
pub struct RulesSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub rules: Vec<RuleOutcome>,
}

impl RulesSummary {
    /// Pass rate on a 0-100 scale; `0.0` when there are no results.
    ///
    /// Scaled before dividing so whole percentages come out exact.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Whether the semantic judge should be consulted, and why.
pub struct InvocationDecision {
    pub should_invoke: bool,
    /// Within `[0, 1]`.
    pub confidence: f64,
    pub reason: String,
    pub mode_used: InvocationModeKind,
    pub threshold_used: ThresholdUsed,
    pub rules_summary: RulesSummary,
}
