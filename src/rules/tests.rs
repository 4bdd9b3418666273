use super::*;
use crate::constants::*;
use crate::similarity::SimilarityEngine;
use crate::store::ConfigStore;
use chrono::{TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;

const PAYROLL_TEXT: &str = "The quarterly payroll audit reviews employee benefits, overtime \
     records and tax withholding for every department in the finance division.";

fn engine() -> RulesEngine {
    RulesEngine::new(Arc::new(ConfigStore::new()))
}

fn find<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
    results
        .iter()
        .find(|r| r.check_name == name)
        .unwrap_or_else(|| panic!("missing result for {name}"))
}

fn long_on_topic_text(words: usize) -> String {
    let vocabulary = [
        "database", "replication", "keeps", "regional", "replicas", "consistent", "while",
        "nightly", "backup", "jobs", "archive", "snapshots", "encrypted", "storage", "operators",
        "monitor", "latency", "alerts", "failover", "drills", "verify", "recovery", "objectives",
        "quarterly", "schema", "migrations", "rolled", "forward", "carefully", "audited",
        "indexes", "rebuilt", "weekly", "maintenance", "windows", "reduce", "query", "contention",
        "capacity", "planning", "forecasts", "growth",
    ];
    let mut out = Vec::with_capacity(words);
    let mut i = 0;
    let mut step = 1;
    while out.len() < words {
        out.push(vocabulary[i % vocabulary.len()]);
        i += step;
        if i % vocabulary.len() == 0 {
            step += 1;
        }
    }
    out.join(" ")
}

// ----- catalog invariant -----

#[test]
fn test_always_eleven_results_in_catalog_order() {
    let engine = engine();
    let inputs: Vec<(String, Vec<String>)> = vec![
        (String::new(), vec![]),
        (PAYROLL_TEXT.to_string(), vec!["payroll".into(), "audit".into()]),
        ("   ".to_string(), vec!["".into(), "  ".into()]),
        ("ünïcödé 文字 ✓".to_string(), vec!["文字".into()]),
        ("x".repeat(20_000), (0..40).map(|i| format!("tag{i}")).collect()),
    ];

    for (content, tags) in inputs {
        let results = engine.check(&content, &tags);
        let names: Vec<&str> = results.iter().map(|r| r.check_name.as_str()).collect();
        assert_eq!(names, CHECK_NAMES);
        for r in &results {
            assert!(
                (0.0..=1.0).contains(&r.confidence_score),
                "{} out of range",
                r.check_name
            );
        }
    }
}

#[test]
fn test_results_carry_run_metadata() {
    let results = engine().check(PAYROLL_TEXT, &["payroll"]);

    for r in &results {
        assert!(r.metadata.contains_key("processing_time_ms"));
        assert_eq!(r.metadata["total_checks_performed"], 11);
        assert_eq!(r.metadata["rules_engine_version"], RULES_ENGINE_VERSION);
    }
}

#[test]
fn test_expected_check_names() {
    assert_eq!(engine().expected_check_names(), &CHECK_NAMES);
}

#[test]
fn test_enforce_catalog_passes_through_valid_set() {
    let results: Vec<CheckResult> = CHECK_NAMES
        .iter()
        .map(|n| CheckResult::pass(*n, 1.0, Severity::Low, category_of(n)))
        .collect();

    let enforced = engine::enforce_catalog(results.clone());
    assert_eq!(enforced, results);
}

#[test]
fn test_enforce_catalog_dedups_and_flags() {
    let mut results: Vec<CheckResult> = CHECK_NAMES
        .iter()
        .map(|n| CheckResult::pass(*n, 1.0, Severity::Low, category_of(n)))
        .collect();
    results.push(CheckResult::fail(
        CHECK_EMPTY_TAGS,
        0.0,
        "second copy",
        Severity::High,
        RuleCategory::TagValidation,
    ));

    let enforced = engine::enforce_catalog(results);

    assert_eq!(enforced.len(), EXPECTED_CHECK_COUNT + 1);
    assert!(enforced[0].passed());
    let diagnostic = enforced.last().unwrap();
    assert_eq!(diagnostic.check_name, CONSISTENCY_CHECK_NAME);
    assert_eq!(diagnostic.status, CheckStatus::Fail);
    assert_eq!(diagnostic.severity, Severity::Critical);
    assert_eq!(diagnostic.metadata["actual_count"], 12);
    assert_eq!(
        diagnostic.metadata["duplicate_checks"],
        serde_json::json!([CHECK_EMPTY_TAGS])
    );
}

#[test]
fn test_enforce_catalog_reports_missing() {
    let results: Vec<CheckResult> = CHECK_NAMES[..10]
        .iter()
        .map(|n| CheckResult::pass(*n, 1.0, Severity::Low, category_of(n)))
        .collect();

    let enforced = engine::enforce_catalog(results);

    assert_eq!(enforced.len(), 11);
    let diagnostic = enforced.last().unwrap();
    assert_eq!(diagnostic.check_name, CONSISTENCY_CHECK_NAME);
    assert_eq!(
        diagnostic.metadata["missing_checks"],
        serde_json::json!([CHECK_CONTEXT_COHERENCE])
    );
}

#[test]
fn test_check_error_becomes_failing_result() {
    let store = Arc::new(ConfigStore::new());
    store
        .update_threshold(THRESHOLD_MIN_TAG_COUNT, 10.0, "test", None)
        .unwrap();
    store
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 5.0, "test", None)
        .unwrap();
    let engine = RulesEngine::new(Arc::clone(&store));

    let results = engine.check(PAYROLL_TEXT, &["payroll"]);

    assert_eq!(results.len(), 11);
    let tag_count = find(&results, CHECK_TAG_COUNT);
    assert_eq!(tag_count.status, CheckStatus::Fail);
    assert_eq!(tag_count.confidence_score, CHECK_ERROR_CONFIDENCE);
    let error = tag_count.metadata["error"].as_str().unwrap();
    assert!(error.contains("min_tag_count"));
}

// ----- example scenarios -----

#[test]
fn test_empty_submission() {
    let results = engine().check("", &[] as &[&str]);

    let empty = find(&results, CHECK_EMPTY_TAGS);
    assert_eq!(empty.status, CheckStatus::Fail);
    assert_eq!(empty.confidence_score, 0.0);
    assert_eq!(empty.severity, Severity::Critical);

    assert_eq!(find(&results, CHECK_TAG_COUNT).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TEXT_QUALITY).status, CheckStatus::Fail);

    for name in [
        CHECK_TAG_TEXT_RELEVANCE,
        CHECK_SEMANTIC_RELEVANCE,
        CHECK_DOMAIN_RELEVANCE,
        CHECK_TAG_SPECIFICITY,
        CHECK_CONTEXT_COHERENCE,
    ] {
        let r = find(&results, name);
        assert_eq!(r.status, CheckStatus::Pass, "{name}");
        assert_eq!(r.confidence_score, 1.0, "{name}");
    }
}

#[test]
fn test_generic_tags_on_rich_content() {
    let content = long_on_topic_text(300);
    let tags = [
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
    ];

    let results = engine().check(&content, &tags);

    assert_eq!(find(&results, CHECK_STOPWORDS).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TAG_SPECIFICITY).status, CheckStatus::Fail);
    assert_eq!(find(&results, CHECK_TEXT_QUALITY).status, CheckStatus::Pass);
}

// ----- individual checks -----

#[test]
fn test_blank_tags_fail() {
    let results = engine().check(PAYROLL_TEXT, &["payroll", "  "]);
    let r = find(&results, CHECK_EMPTY_TAGS);

    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.2);
    assert_eq!(r.severity, Severity::High);
    assert_eq!(r.metadata["empty_tag_count"], 1);
}

#[test]
fn test_too_many_tags() {
    let tags: Vec<String> = (0..21).map(|i| format!("topic{i}")).collect();
    let results = engine().check(PAYROLL_TEXT, &tags);
    let r = find(&results, CHECK_TAG_COUNT);

    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.6);
}

#[test]
fn test_tag_count_follows_store_updates() {
    let store = Arc::new(ConfigStore::new());
    let engine = RulesEngine::new(Arc::clone(&store));
    let tags = ["payroll", "audit", "benefits"];

    assert!(find(&engine.check(PAYROLL_TEXT, &tags), CHECK_TAG_COUNT).passed());

    store
        .update_threshold(THRESHOLD_MAX_TAG_COUNT, 2.0, "test", Some("tighten"))
        .unwrap();

    assert!(!find(&engine.check(PAYROLL_TEXT, &tags), CHECK_TAG_COUNT).passed());
}

#[test]
fn test_text_quality_outcomes() {
    let engine = engine();

    let short = engine.check("Too short.", &["payroll"]);
    assert_eq!(find(&short, CHECK_TEXT_QUALITY).confidence_score, 0.1);

    let long = engine.check(&"payroll ".repeat(1_300), &["payroll"]);
    assert_eq!(find(&long, CHECK_TEXT_QUALITY).confidence_score, 0.7);

    let numeric = engine.check(
        "12345 67890 ab cd ef gh ij kl mn op qr st uv wx yz 11111 22222 33333",
        &["payroll"],
    );
    let r = find(&numeric, CHECK_TEXT_QUALITY);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.4);
    assert_eq!(r.metadata["meaningful_word_count"], 0);

    let good = engine.check(PAYROLL_TEXT, &["payroll"]);
    assert!(find(&good, CHECK_TEXT_QUALITY).passed());
}

#[test]
fn test_multi_word_generic_tag_counts_as_stopword() {
    let results = engine().check(
        PAYROLL_TEXT,
        &["general business information", "payroll audit"],
    );
    let r = find(&results, CHECK_STOPWORDS);

    assert_eq!(r.status, CheckStatus::Pass);
    assert_eq!(r.metadata["stopword_ratio"], 0.5);
    assert_eq!(r.confidence_score, 0.5);
}

#[test]
fn test_spam_signature() {
    let results = engine().check(
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor.",
        &["payroll"],
    );
    let r = find(&results, CHECK_SPAM);

    assert_eq!(r.status, CheckStatus::Fail);
    assert!((r.confidence_score - 0.7).abs() < 1e-9);
    assert_eq!(r.severity, Severity::High);
}

#[test]
fn test_spam_word_repetition() {
    let results = engine().check(
        "buy now buy later buy today buy soon buy cheap buy fast",
        &["payroll"],
    );
    let r = find(&results, CHECK_SPAM);

    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.metadata["repeated_word"], "buy");
    assert!((r.confidence_score - 0.5).abs() < 1e-9);
}

#[test]
fn test_clean_text_is_not_spam() {
    let results = engine().check(PAYROLL_TEXT, &["payroll"]);
    assert!(find(&results, CHECK_SPAM).passed());
}

#[test]
fn test_duplicate_window() {
    let store = Arc::new(ConfigStore::new());
    store
        .update_threshold(THRESHOLD_MAX_DUPLICATES, 1.0, "test", None)
        .unwrap();
    let engine = RulesEngine::new(store);
    let now = Utc::now();

    let first = engine.check_at(PAYROLL_TEXT, &["payroll"], now);
    assert!(find(&first, CHECK_DUPLICATE).passed());

    let second = engine.check_at(PAYROLL_TEXT, &["payroll"], now + TimeDelta::minutes(5));
    let r = find(&second, CHECK_DUPLICATE);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.1);
    assert_eq!(r.metadata["duplicate_count"], 1);

    let later = engine.check_at(PAYROLL_TEXT, &["payroll"], now + TimeDelta::hours(25));
    assert!(find(&later, CHECK_DUPLICATE).passed());

    engine.clear_duplicate_history();
    assert_eq!(engine.tracked_fingerprints(), 0);
    let fresh = engine.check_at(PAYROLL_TEXT, &["payroll"], now + TimeDelta::hours(25));
    assert!(find(&fresh, CHECK_DUPLICATE).passed());
}

#[test]
fn test_duplicate_default_allows_five_occurrences() {
    let engine = engine();
    let now = Utc::now();

    for i in 0..5 {
        let results = engine.check_at(PAYROLL_TEXT, &["payroll"], now + TimeDelta::seconds(i));
        assert!(find(&results, CHECK_DUPLICATE).passed(), "submission {i}");
    }

    let sixth = engine.check_at(PAYROLL_TEXT, &["payroll"], now + TimeDelta::seconds(10));
    assert!(!find(&sixth, CHECK_DUPLICATE).passed());
}

#[test]
fn test_duplicate_uses_normalized_content() {
    let store = Arc::new(ConfigStore::new());
    store
        .update_threshold(THRESHOLD_MAX_DUPLICATES, 1.0, "test", None)
        .unwrap();
    let engine = RulesEngine::new(store);

    engine.check("Hello,   World! Payroll audit ahead.", &["payroll"]);
    let results = engine.check("hello world payroll audit ahead", &["payroll"]);

    assert!(!find(&results, CHECK_DUPLICATE).passed());
}

#[test]
fn test_tag_text_relevance_scoring() {
    let engine = engine();

    let full = engine.check(PAYROLL_TEXT, &["payroll", "astronomy"]);
    let r = find(&full, CHECK_TAG_TEXT_RELEVANCE);
    assert!(r.passed());
    assert_eq!(r.confidence_score, 0.5);

    let partial = engine.check(PAYROLL_TEXT, &["astronomy", "galaxies", "nebula", "roll"]);
    let r = find(&partial, CHECK_TAG_TEXT_RELEVANCE);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.125);
}

#[test]
fn test_semantic_relevance() {
    let engine = engine();
    let content = "The database server backup runs nightly. Database maintenance keeps the server healthy.";

    let related = engine.check(content, &["database", "server backup", "gardening"]);
    let r = find(&related, CHECK_SEMANTIC_RELEVANCE);
    assert!(r.passed());
    assert!(r.confidence_score > 0.15);

    let unrelated = engine.check(content, &["astronomy", "gardening"]);
    let r = find(&unrelated, CHECK_SEMANTIC_RELEVANCE);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.severity, Severity::High);
    assert_eq!(r.confidence_score, 0.0);
}

#[test]
fn test_custom_similarity_engine() {
    let lenient = crate::similarity::TfidfConfig {
        max_df: 1.0,
        ..Default::default()
    };
    let custom = engine().with_similarity(SimilarityEngine::with_configs(
        lenient.clone(),
        lenient,
    ));

    let strict = find(&engine().check("database", &["database"]), CHECK_SEMANTIC_RELEVANCE)
        .confidence_score;
    let results = custom.check("database", &["database"]);
    let r = find(&results, CHECK_SEMANTIC_RELEVANCE);

    assert_eq!(strict, 0.0);
    assert!(r.passed());
    assert!((r.confidence_score - 1.0).abs() < 1e-9);
}

#[test]
fn test_semantic_relevance_without_content() {
    let results = engine().check("", &["payroll"]);
    let r = find(&results, CHECK_SEMANTIC_RELEVANCE);

    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.1);
}

#[test]
fn test_domain_relevance() {
    let engine = engine();

    let hr = engine.check(PAYROLL_TEXT, &["payroll", "quarterly"]);
    let r = find(&hr, CHECK_DOMAIN_RELEVANCE);
    assert!(r.passed());
    assert_eq!(r.confidence_score, 0.5);
    assert!(r.metadata["domain_scores"].get("human_resources").is_some());

    let off = engine.check(PAYROLL_TEXT, &["astronomy", "gardening"]);
    let r = find(&off, CHECK_DOMAIN_RELEVANCE);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.0);
}

#[test]
fn test_custom_lexicon_extends_domains() {
    let lexicon = DomainLexicon::default().with_domain(Domain::new(
        "astronomy",
        &["telescope", "galaxy", "nebula"],
    ));
    let engine = engine().with_lexicon(lexicon);

    let results = engine.check(PAYROLL_TEXT, &["nebula"]);
    assert!(find(&results, CHECK_DOMAIN_RELEVANCE).passed());
}

#[test]
fn test_tag_specificity_scores() {
    let lexicon = DomainLexicon::default().with_domain(Domain::new("astronomy", &["nebula"]));
    let engine = engine().with_lexicon(lexicon);

    let results = engine.check(
        PAYROLL_TEXT,
        &["quarterly payroll audit", "nebula", "kubernetes", "budget", "tax"],
    );
    let r = find(&results, CHECK_TAG_SPECIFICITY);

    assert!(r.passed());
    assert!((r.confidence_score - 0.58).abs() < 1e-9);
    assert_eq!(r.metadata["individual_scores"]["nebula"], 0.7);
}

#[test]
fn test_broad_domain_terms_are_generic() {
    let results = engine().check(PAYROLL_TEXT, &["payroll", "benefits"]);
    let r = find(&results, CHECK_TAG_SPECIFICITY);

    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.0);
    assert_eq!(r.metadata["generic_tags"], serde_json::json!(["payroll", "benefits"]));
}

#[test]
fn test_context_coherence() {
    let engine = engine();

    let single = engine.check(PAYROLL_TEXT, &["payroll"]);
    let r = find(&single, CHECK_CONTEXT_COHERENCE);
    assert!(r.passed());
    assert_eq!(r.confidence_score, 1.0);

    let coherent = engine.check(
        PAYROLL_TEXT,
        &[
            "database backup",
            "database backup policy",
            "database backup schedule",
            "payroll",
        ],
    );
    assert!(find(&coherent, CHECK_CONTEXT_COHERENCE).passed());

    let scattered = engine.check(PAYROLL_TEXT, &["astronomy", "payroll", "gardening"]);
    let r = find(&scattered, CHECK_CONTEXT_COHERENCE);
    assert_eq!(r.status, CheckStatus::Fail);
    assert_eq!(r.confidence_score, 0.0);
}

// ----- engine plumbing -----

#[test]
fn test_metrics_accumulate_and_reset_on_config_change() {
    let store = Arc::new(ConfigStore::new());
    let engine = RulesEngine::new(Arc::clone(&store));
    assert_eq!(engine.metrics().runs, 0);

    engine.check(PAYROLL_TEXT, &["payroll"]);
    engine.check(PAYROLL_TEXT, &["audit"]);
    let metrics = engine.metrics();
    assert_eq!(metrics.runs, 2);
    assert!(metrics.min_processing_time_ms <= metrics.max_processing_time_ms);

    store
        .update_rule_weight(CHECK_SPAM, 2.0, "test", None)
        .unwrap();
    assert_eq!(engine.metrics().runs, 0);

    engine.check(PAYROLL_TEXT, &["payroll"]);
    engine.reset_metrics();
    assert_eq!(engine.metrics(), EngineMetrics::default());
}

#[test]
fn test_drop_unsubscribes() {
    let store = Arc::new(ConfigStore::new());
    let engine = RulesEngine::new(Arc::clone(&store));
    assert_eq!(store.subscriber_count(), 1);

    drop(engine);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_engine_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RulesEngine>();
}

// ----- building blocks -----

#[test]
fn test_threshold_snapshot_falls_back_to_defaults() {
    let snapshot = ThresholdSnapshot::from_values(HashMap::new());
    assert_eq!(snapshot.get(THRESHOLD_SPAM).unwrap(), 0.3);

    let snapshot = snapshot.with_value(THRESHOLD_SPAM, 0.9);
    assert_eq!(snapshot.get(THRESHOLD_SPAM).unwrap(), 0.9);

    assert!(matches!(
        snapshot.get("no_such_threshold"),
        Err(RuleError::MissingThreshold { .. })
    ));
}

#[test]
fn test_lexicon_matches_on_token_boundaries() {
    let lexicon = DomainLexicon::default();

    assert_eq!(lexicon.matching_domain("HR onboarding"), Some("human_resources"));
    assert_eq!(lexicon.matching_domain("three apples"), None);
    assert_eq!(
        lexicon.matching_domain("Human Resources review"),
        Some("human_resources")
    );
    assert!(lexicon.contains_term("Payroll"));
    assert!(!lexicon.contains_term("payroll audit"));
}

#[test]
fn test_lexicon_replaces_domain_with_same_name() {
    let lexicon = DomainLexicon::default().with_domain(Domain::new("legal", &["tort"]));

    assert_eq!(lexicon.domains().len(), 3);
    assert!(lexicon.contains_term("tort"));
    assert!(!lexicon.contains_term("contract"));
}

#[test]
fn test_duplicate_tracker_evicts_at_capacity() {
    let tracker = DuplicateTracker::new(2);
    let now = Utc::now();
    let window = TimeDelta::hours(24);

    tracker.observe(1, now, window, 5);
    tracker.observe(2, now + TimeDelta::seconds(1), window, 5);
    tracker.observe(3, now + TimeDelta::seconds(2), window, 5);

    assert_eq!(tracker.len(), 2);
    let first_again = tracker.observe(1, now + TimeDelta::seconds(3), window, 5);
    assert_eq!(first_again.prior, 0);
}

#[test]
fn test_duplicate_tracker_does_not_record_rejected() {
    let tracker = DuplicateTracker::new(10);
    let now = Utc::now();
    let window = TimeDelta::hours(1);

    assert!(tracker.observe(7, now, window, 1).recorded);
    let second = tracker.observe(7, now, window, 1);
    assert_eq!(second.prior, 1);
    assert!(!second.recorded);
    assert_eq!(tracker.observe(7, now, window, 1).prior, 1);
}
