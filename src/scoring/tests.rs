use super::*;
use crate::rules::{CheckResult, RuleCategory, Severity};
use std::collections::HashMap;

fn result(name: &str, confidence: f64) -> CheckResult {
    CheckResult::pass(name, confidence, Severity::Low, RuleCategory::ContentQuality)
}

fn weights(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_unweighted_mean() {
    let results = [result("a", 1.0), result("b", 0.5), result("c", 0.0)];
    let score = WeightedScorer::new().score(&results, &HashMap::new());

    assert!((score - 0.5).abs() < 1e-12);
}

#[test]
fn test_weights_shift_the_score() {
    let results = [result("a", 1.0), result("b", 0.0)];
    let score = WeightedScorer::new().score(&results, &weights(&[("a", 3.0), ("b", 1.0)]));

    assert!((score - 0.75).abs() < 1e-12);
}

#[test]
fn test_missing_weight_defaults_to_one() {
    let results = [result("a", 1.0), result("b", 0.0)];
    let score = WeightedScorer::new().score(&results, &weights(&[("a", 1.0)]));

    assert!((score - 0.5).abs() < 1e-12);
}

#[test]
fn test_zero_total_weight_scores_zero() {
    let results = [result("a", 1.0), result("b", 1.0)];
    let scorer = WeightedScorer::new();

    assert_eq!(scorer.score(&results, &weights(&[("a", 0.0), ("b", 0.0)])), 0.0);
    assert_eq!(scorer.score(&[], &HashMap::new()), 0.0);
}

#[test]
fn test_invalid_weights_are_ignored() {
    let results = [result("a", 1.0), result("b", 0.0), result("c", 0.0)];
    let breakdown = WeightedScorer::new().breakdown(
        &results,
        &weights(&[("b", f64::NAN), ("c", -2.0)]),
    );

    assert_eq!(breakdown.score, 1.0);
    assert_eq!(breakdown.total_weight, 1.0);
    assert_eq!(breakdown.contribution("b").map(|c| c.weight), Some(0.0));
}

#[test]
fn test_quality_score_scale() {
    let results = [result("a", 0.8), result("b", 0.6)];
    let quality = WeightedScorer::new().quality_score(&results, &HashMap::new());

    assert!((quality - 70.0).abs() < 1e-9);
}

#[test]
fn test_custom_default_weight() {
    let results = [result("a", 1.0), result("b", 0.0)];
    let scorer = WeightedScorer::with_default_weight(2.0);

    assert_eq!(scorer.default_weight(), 2.0);
    let score = scorer.score(&results, &weights(&[("b", 1.0)]));
    assert!((score - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_breakdown_lists_every_result() {
    let results = [result("a", 0.4), result("b", 0.9)];
    let breakdown = WeightedScorer::new().breakdown(&results, &weights(&[("b", 2.0)]));

    assert_eq!(breakdown.contributions.len(), 2);
    let b = breakdown.contribution("b").unwrap();
    assert!((b.weighted() - 1.8).abs() < 1e-12);
    assert!(breakdown.to_string().contains("2 checks"));
}
