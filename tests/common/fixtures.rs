//! Test fixtures for integration tests.

use std::sync::Arc;

use tagsift::rules::{CheckResult, CheckStatus, RuleCategory, RulesEngine, Severity};
use tagsift::store::ConfigStore;

pub const PAYROLL_TEXT: &str = "Quarterly payroll review: the finance team reconciles \
    employee salary records, benefits deductions and overtime approvals before the \
    compensation report is signed off by human resources.";

pub const BACKUP_TEXT: &str = "The nightly database backup job archives encrypted snapshots \
    to regional storage so operators can verify recovery objectives during failover drills.";

pub const SPAM_TEXT: &str = "Lorem ipsum dolor sit amet. BUY NOW!!! Click here for a free \
    money offer, limited time only, act now!";

#[derive(Debug, Default, Clone)]
pub struct SubmissionBuilder {
    content: Option<String>,
    tags: Vec<String>,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_numbered_tags(mut self, count: usize) -> Self {
        self.tags.extend((0..count).map(|i| format!("topic{i}")));
        self
    }

    pub fn with_long_content(mut self, words: usize) -> Self {
        self.content = Some(generate_on_topic_text(words));
        self
    }

    pub fn build(self) -> (String, Vec<String>) {
        (
            self.content.unwrap_or_else(|| BACKUP_TEXT.to_string()),
            self.tags,
        )
    }
}

/// Deterministic on-topic prose about database operations.
pub fn generate_on_topic_text(words: usize) -> String {
    const VOCABULARY: [&str; 24] = [
        "database", "replication", "keeps", "regional", "replicas", "consistent", "while",
        "nightly", "backup", "jobs", "archive", "snapshots", "encrypted", "storage",
        "operators", "monitor", "latency", "alerts", "failover", "drills", "verify",
        "recovery", "schema", "migrations",
    ];

    (0..words)
        .map(|i| VOCABULARY[(i * 7 + i / VOCABULARY.len()) % VOCABULARY.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// A varied batch of submissions, from degenerate to well-formed.
pub fn create_varied_submissions() -> Vec<(String, Vec<String>)> {
    vec![
        SubmissionBuilder::new().content("").build(),
        SubmissionBuilder::new().content("   ").tags(&["", " "]).build(),
        SubmissionBuilder::new().tags(&["database", "backup"]).build(),
        SubmissionBuilder::new()
            .content(PAYROLL_TEXT)
            .tags(&["payroll", "salary reconciliation", "benefits"])
            .build(),
        SubmissionBuilder::new()
            .content(SPAM_TEXT)
            .tags(&["offer"])
            .build(),
        SubmissionBuilder::new().with_numbered_tags(40).build(),
        SubmissionBuilder::new()
            .with_long_content(2_000)
            .tags(&["document", "file", "data"])
            .build(),
        SubmissionBuilder::new()
            .content("<p>Markup <b>only</b></p> 12345 !!!")
            .tag("markup")
            .build(),
    ]
}

pub fn create_engine() -> (Arc<ConfigStore>, Arc<RulesEngine>) {
    let store = Arc::new(ConfigStore::new());
    let engine = Arc::new(RulesEngine::new(Arc::clone(&store)));
    (store, engine)
}

pub fn find<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
    results
        .iter()
        .find(|r| r.check_name == name)
        .unwrap_or_else(|| panic!("missing result for {name}"))
}

/// `passed` passing results followed by failing ones, named `check_{i}`.
pub fn synthetic_results(passed: usize, total: usize) -> Vec<CheckResult> {
    (0..total)
        .map(|i| {
            let name = format!("check_{i}");
            if i < passed {
                CheckResult::pass(name, 0.9, Severity::Low, RuleCategory::ContentQuality)
            } else {
                CheckResult::fail(
                    name,
                    0.2,
                    "synthetic failure",
                    Severity::Medium,
                    RuleCategory::ContentQuality,
                )
            }
        })
        .collect()
}

pub fn assert_catalog_shape(results: &[CheckResult]) {
    assert_eq!(results.len(), tagsift::EXPECTED_CHECK_COUNT);
    for (result, expected) in results.iter().zip(tagsift::CHECK_NAMES) {
        assert_eq!(result.check_name, expected);
        assert!((0.0..=1.0).contains(&result.confidence_score));
        assert!(matches!(
            result.status,
            CheckStatus::Pass | CheckStatus::Fail | CheckStatus::Warning
        ));
    }
}
