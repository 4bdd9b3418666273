//! Integration tests for the rules engine, scorer and invocation decision.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use common::fixtures::{
    PAYROLL_TEXT, SubmissionBuilder, assert_catalog_shape, create_engine,
    create_varied_submissions, find, synthetic_results,
};
use tagsift::constants::*;
use tagsift::decision::{InvocationDecisionEngine, InvocationMode, InvocationSettings};
use tagsift::rules::CheckStatus;
use tagsift::scoring::WeightedScorer;

#[test]
fn test_every_submission_yields_full_catalog() {
    let (_store, engine) = create_engine();

    for (content, tags) in create_varied_submissions() {
        let results = engine.check(&content, &tags);
        assert_catalog_shape(&results);
    }
}

#[test]
fn test_empty_submission_scenario() {
    let (_store, engine) = create_engine();
    let (content, tags) = SubmissionBuilder::new().content("").build();

    let results = engine.check(&content, &tags);

    assert_eq!(find(&results, CHECK_EMPTY_TAGS).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TEXT_QUALITY).status, CheckStatus::Fail);
    for name in &CHECK_NAMES[6..] {
        assert_eq!(find(&results, name).status, CheckStatus::Pass, "{name}");
    }
}

#[test]
fn test_generic_tags_scenario() {
    let (_store, engine) = create_engine();
    let (content, tags) = SubmissionBuilder::new()
        .with_long_content(300)
        .tags(&[
            "document",
            "file",
            "content",
            "text",
            "information",
            "data",
            "report",
            "summary",
            "overview",
            "details",
            "description",
        ])
        .build();

    let results = engine.check(&content, &tags);

    assert_eq!(find(&results, CHECK_STOPWORDS).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TAG_SPECIFICITY).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TEXT_QUALITY).status, CheckStatus::Pass);
}

#[test]
fn test_weighted_boundary_scenario() {
    let results = synthetic_results(8, 10);
    let settings =
        InvocationSettings::new(InvocationMode::Weighted { threshold: 0.8 }, HashMap::new())
            .expect("valid settings");

    let decision = InvocationDecisionEngine::new().evaluate(&results, &settings);

    assert!(decision.should_invoke);
    assert_eq!(decision.rules_summary.passed, 8);
    assert_eq!(decision.confidence, 1.0);
}

#[test]
fn test_store_weights_drive_score_and_decision() {
    let (store, engine) = create_engine();
    let (content, tags) = SubmissionBuilder::new()
        .content(PAYROLL_TEXT)
        .tags(&["payroll", "salary reconciliation"])
        .build();
    let results = engine.check(&content, &tags);
    let scorer = WeightedScorer::new();

    let before = scorer.score(&results, &store.rule_weights());
    for name in CHECK_NAMES {
        store
            .set_rule_enabled(name, name == CHECK_EMPTY_TAGS, "test", None)
            .expect("rule exists");
    }
    let after = scorer.score(&results, &store.rule_weights());

    assert!((0.0..=1.0).contains(&before));
    assert_eq!(after, find(&results, CHECK_EMPTY_TAGS).confidence_score);
}

#[test]
fn test_threshold_change_applies_to_next_check() {
    let (store, engine) = create_engine();
    let (content, tags) = SubmissionBuilder::new().with_numbered_tags(6).build();

    let results = engine.check(&content, &tags);
    assert_eq!(find(&results, CHECK_TAG_COUNT).status, CheckStatus::Pass);

    store
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 5.0, "test", None)
        .expect("in bounds");

    let results = engine.check(&content, &tags);
    assert_eq!(find(&results, CHECK_TAG_COUNT).status, CheckStatus::Fail);
}

#[test]
fn test_concurrent_checks_share_one_engine() {
    let (store, engine) = create_engine();
    let submissions = Arc::new(create_varied_submissions());

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            let submissions = Arc::clone(&submissions);
            thread::spawn(move || {
                for round in 0..4 {
                    let (content, tags) = &submissions[(worker + round) % submissions.len()];
                    let results = engine.check(content, tags);
                    assert_eq!(results.len(), EXPECTED_CHECK_COUNT);
                }
            })
        })
        .collect();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for weight in [2.0, 3.0, 1.5] {
                store
                    .update_rule_weight(CHECK_SPAM, weight, "test", None)
                    .expect("in bounds");
            }
        })
    };

    for handle in workers {
        handle.join().expect("worker finished");
    }
    writer.join().expect("writer finished");

    assert_eq!(store.get_rule(CHECK_SPAM).map(|r| r.weight), Some(1.5));
}

#[test]
fn test_concurrent_duplicates_respect_limit() {
    let (store, engine) = create_engine();
    let limit = store
        .get_threshold(THRESHOLD_MAX_DUPLICATES)
        .expect("default threshold") as usize;

    let handles: Vec<_> = (0..limit + 3)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let results = engine.check(PAYROLL_TEXT, &["payroll"]);
                results[5].passed()
            })
        })
        .collect();

    let passed = handles
        .into_iter()
        .map(|h| h.join().expect("thread finished"))
        .filter(|&p| p)
        .count();

    assert_eq!(passed, limit);
    assert_eq!(engine.tracked_fingerprints(), 1);
}
