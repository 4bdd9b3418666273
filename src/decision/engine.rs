use tracing::debug;

use super::types::{
    InvocationDecision, InvocationMode, InvocationModeKind, InvocationSettings, RuleOutcome,
    RulesSummary,
};
use crate::rules::{CheckResult, CheckStatus, clamp_confidence};

#[derive(Debug, Clone, Copy, Default)]
/// Decides whether the semantic judge should see a submission.
///
/// Stateless: every call evaluates the given results under the given settings.
pub struct InvocationDecisionEngine;

impl InvocationDecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `results` under the strategy in `settings`.
    ///
    /// In range mode the confidence inside the band is triangular: 1.0 at the
    /// midpoint, 0.0 at either edge.
    pub fn evaluate(
        &self,
        results: &[CheckResult],
        settings: &InvocationSettings,
    ) -> InvocationDecision {
        let summary = summarize(results);
        let mode = settings.mode();

        let (should_invoke, confidence, reason) = match mode {
            InvocationMode::Binary => evaluate_binary(&summary),
            InvocationMode::Percentage { threshold } => evaluate_percentage(&summary, threshold),
            InvocationMode::Weighted { threshold } => {
                evaluate_weighted(results, settings, threshold)
            }
            InvocationMode::Range { min, max } => evaluate_range(&summary, min, max),
        };

        debug!(
            mode = %mode.kind(),
            should_invoke,
            confidence,
            passed = summary.passed,
            total = summary.total,
            "Invocation decision"
        );

        InvocationDecision {
            should_invoke,
            confidence: clamp_confidence(confidence),
            reason,
            mode_used: mode.kind(),
            threshold_used: mode.threshold_used(),
            rules_summary: summary,
        }
    }
}

/// Counts and per-rule detail; warnings are neither passed nor failed.
pub fn summarize(results: &[CheckResult]) -> RulesSummary {
    let mut summary = RulesSummary {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        match result.status {
            CheckStatus::Pass => summary.passed += 1,
            CheckStatus::Fail => summary.failed += 1,
            CheckStatus::Warning => summary.warnings += 1,
        }
        summary.rules.push(RuleOutcome {
            name: result.check_name.clone(),
            status: result.status,
            confidence: result.confidence_score,
        });
    }

    summary
}

fn evaluate_binary(summary: &RulesSummary) -> (bool, f64, String) {
    let all_passed = summary.passed == summary.total;
    let reason = if all_passed {
        format!(
            "{} mode: all {} checks passed",
            InvocationModeKind::Binary,
            summary.total
        )
    } else {
        format!(
            "{} mode: {} of {} checks did not pass",
            InvocationModeKind::Binary,
            summary.total - summary.passed,
            summary.total
        )
    };
    (all_passed, if all_passed { 1.0 } else { 0.0 }, reason)
}

fn evaluate_percentage(summary: &RulesSummary, threshold: f64) -> (bool, f64, String) {
    let pass_rate = summary.pass_rate();
    let should_invoke = pass_rate >= threshold;
    let confidence = ratio_confidence(pass_rate, threshold);
    let comparison = if should_invoke { ">=" } else { "<" };
    let reason = format!(
        "{} mode: pass rate {:.1}% {} threshold {:.1}%",
        InvocationModeKind::Percentage,
        pass_rate,
        comparison,
        threshold
    );
    (should_invoke, confidence, reason)
}

fn evaluate_weighted(
    results: &[CheckResult],
    settings: &InvocationSettings,
    threshold: f64,
) -> (bool, f64, String) {
    let (passed_weight, total_weight) =
        results
            .iter()
            .fold((0.0f64, 0.0f64), |(passed, total), result| {
                let weight = settings.weight_for(&result.check_name);
                let passed = if result.passed() { passed + weight } else { passed };
                (passed, total + weight)
            });

    let weighted = if total_weight > 0.0 {
        passed_weight / total_weight
    } else {
        0.0
    };

    let should_invoke = weighted >= threshold;
    let confidence = ratio_confidence(weighted, threshold);
    let comparison = if should_invoke { ">=" } else { "<" };
    let reason = format!(
        "{} mode: weighted score {:.3} {} threshold {:.3}",
        InvocationModeKind::Weighted,
        weighted,
        comparison,
        threshold
    );
    (should_invoke, confidence, reason)
}

/// Auto-reject at or below `min`, auto-approve at or above `max`, judge in between.
///
/// Inside the band, confidence is triangular: 1.0 at the midpoint, falling
/// linearly to 0.0 at either edge, rather than staying at 1.0 over the upper half.
fn evaluate_range(summary: &RulesSummary, min: f64, max: f64) -> (bool, f64, String) {
    let pass_rate = summary.pass_rate();

    if pass_rate <= min {
        let reason = format!(
            "{} mode: pass rate {:.1}% <= {:.1}%, auto-reject",
            InvocationModeKind::Range,
            pass_rate,
            min
        );
        return (false, 1.0, reason);
    }

    if pass_rate >= max {
        let reason = format!(
            "{} mode: pass rate {:.1}% >= {:.1}%, auto-approve",
            InvocationModeKind::Range,
            pass_rate,
            max
        );
        return (false, 1.0, reason);
    }

    let midpoint = (min + max) / 2.0;
    let half_width = (max - min) / 2.0;
    let confidence = if half_width > 0.0 {
        1.0 - (pass_rate - midpoint).abs() / half_width
    } else {
        0.0
    };
    let reason = format!(
        "{} mode: pass rate {:.1}% within ({:.1}%, {:.1}%), needs review",
        InvocationModeKind::Range,
        pass_rate,
        min,
        max
    );
    (true, confidence, reason)
}

/// `min(value / threshold, 1)`, with a zero threshold always fully satisfied.
fn ratio_confidence(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        1.0
    } else {
        (value / threshold).min(1.0)
    }
}
