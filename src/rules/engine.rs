//! Orchestrates the check catalog for one submission.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, error, instrument, warn};

use super::checks::{CATALOG, CheckContext, CheckSpec};
use super::duplicate::DuplicateTracker;
use super::lexicon::DomainLexicon;
use super::metrics::{EngineMetrics, MetricsRecorder};
use super::thresholds::ThresholdSnapshot;
use super::types::{CheckResult, RuleCategory, Severity};
use crate::config::Config;
use crate::constants::{
    CHECK_ERROR_CONFIDENCE, CHECK_NAMES, CONSISTENCY_CHECK_NAME, DEFAULT_DUPLICATE_CAPACITY,
    EXPECTED_CHECK_COUNT, RULES_ENGINE_VERSION,
};
use crate::similarity::SimilarityEngine;
use crate::store::{ConfigStore, SubscriptionId};

/// Runs the eleven quality checks against a submission.
///
/// Thresholds are read from the shared [`ConfigStore`] once per call. The engine
/// is `Send + Sync`; share it through an `Arc`. Any configuration change resets
/// the timing metrics.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tagsift::rules::RulesEngine;
/// use tagsift::store::ConfigStore;
///
/// let engine = RulesEngine::new(Arc::new(ConfigStore::new()));
/// let results = engine.check("Quarterly payroll audit for the finance team.", &["payroll"]);
/// assert_eq!(results.len(), 11);
/// ```
pub struct RulesEngine {
    store: Arc<ConfigStore>,
    similarity: SimilarityEngine,
    lexicon: DomainLexicon,
    duplicates: DuplicateTracker,
    metrics: Arc<MetricsRecorder>,
    subscription: SubscriptionId,
}

impl fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEngine")
            .field("lexicon", &self.lexicon)
            .field("duplicates", &self.duplicates)
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

impl RulesEngine {
    /// Creates an engine with the default duplicate-window capacity.
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self::with_capacity(store, DEFAULT_DUPLICATE_CAPACITY)
    }

    /// Creates an engine sized from [`Config::duplicate_capacity`].
    pub fn from_config(store: Arc<ConfigStore>, config: &Config) -> Self {
        Self::with_capacity(store, config.duplicate_capacity)
    }

    /// Creates an engine tracking at most `duplicate_capacity` distinct fingerprints.
    pub fn with_capacity(store: Arc<ConfigStore>, duplicate_capacity: usize) -> Self {
        let metrics = Arc::new(MetricsRecorder::default());

        let on_change = Arc::clone(&metrics);
        let subscription = store.subscribe(move |event| {
            on_change.reset();
            debug!(item = %event.item_name, "Configuration changed; rules metrics reset");
            Ok(())
        });

        Self {
            store,
            similarity: SimilarityEngine::new(),
            lexicon: DomainLexicon::default(),
            duplicates: DuplicateTracker::new(duplicate_capacity),
            metrics,
            subscription,
        }
    }

    /// Replaces the domain lexicon.
    pub fn with_lexicon(mut self, lexicon: DomainLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Replaces the similarity engine.
    pub fn with_similarity(mut self, similarity: SimilarityEngine) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn lexicon(&self) -> &DomainLexicon {
        &self.lexicon
    }

    /// The fixed catalog, in result order.
    pub fn expected_check_names(&self) -> &'static [&'static str] {
        &CHECK_NAMES
    }

    /// Runs every check against `content` and `tags` at the current time.
    ///
    /// Always returns the catalog's eleven results in order, unless the catalog
    /// invariant is broken (see [`CONSISTENCY_CHECK_NAME`]).
    pub fn check<S: AsRef<str>>(&self, content: &str, tags: &[S]) -> Vec<CheckResult> {
        self.check_at(content, tags, Utc::now())
    }

    /// Like [`check`](Self::check), evaluating the duplicate window at `now`.
    #[instrument(skip_all, fields(content_len = content.len(), tags = tags.len()))]
    pub fn check_at<S: AsRef<str>>(
        &self,
        content: &str,
        tags: &[S],
        now: DateTime<Utc>,
    ) -> Vec<CheckResult> {
        let started = Instant::now();

        let tags: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
        let thresholds = ThresholdSnapshot::from_store(&self.store);
        let ctx = CheckContext {
            content,
            tags: &tags,
            thresholds: &thresholds,
            similarity: &self.similarity,
            lexicon: &self.lexicon,
            duplicates: &self.duplicates,
            now,
        };

        let results: Vec<CheckResult> = CATALOG.iter().map(|spec| run_guarded(spec, &ctx)).collect();
        let mut results = enforce_catalog(results);

        let total = results.len();
        for result in &mut results {
            result
                .metadata
                .insert("total_checks_performed".to_string(), json!(total));
            result
                .metadata
                .insert("rules_engine_version".to_string(), json!(RULES_ENGINE_VERSION));
        }

        let elapsed = started.elapsed();
        self.metrics.record(elapsed);

        let passed = results.iter().filter(|r| r.passed()).count();
        debug!(
            passed,
            total,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Rules evaluated"
        );

        results
    }

    /// Timing statistics since construction or the last reset.
    pub fn metrics(&self) -> EngineMetrics {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Forgets every fingerprint in the duplicate window.
    pub fn clear_duplicate_history(&self) {
        self.duplicates.clear();
        debug!("Duplicate history cleared");
    }

    /// Distinct fingerprints currently in the duplicate window.
    pub fn tracked_fingerprints(&self) -> usize {
        self.duplicates.len()
    }
}

impl Drop for RulesEngine {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

/// Runs one check, turning errors and panics into a failing result.
fn run_guarded(spec: &CheckSpec, ctx: &CheckContext<'_>) -> CheckResult {
    let started = Instant::now();

    let mut result = match panic::catch_unwind(AssertUnwindSafe(|| (spec.run)(ctx))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!(check = spec.name, error = %e, "Check could not be evaluated");
            error_result(spec, &e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(check = spec.name, panic = %message, "Check panicked");
            error_result(spec, &message)
        }
    };

    result.metadata.insert(
        "processing_time_ms".to_string(),
        json!(started.elapsed().as_secs_f64() * 1000.0),
    );
    result
}

fn error_result(spec: &CheckSpec, message: &str) -> CheckResult {
    CheckResult::fail(
        spec.name,
        CHECK_ERROR_CONFIDENCE,
        format!("Check could not be evaluated: {message}"),
        Severity::Medium,
        spec.category,
    )
    .with_suggestion("Review the content, tags and threshold configuration")
    .with_metadata("error", message)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Enforces "exactly the catalog, once each, in order".
///
/// On violation, keeps the first result per name and appends a critical
/// [`CONSISTENCY_CHECK_NAME`] failure describing what was wrong.
pub(crate) fn enforce_catalog(results: Vec<CheckResult>) -> Vec<CheckResult> {
    let names: Vec<&str> = results.iter().map(|r| r.check_name.as_str()).collect();
    if names == CHECK_NAMES {
        return results;
    }

    let mut seen = HashSet::new();
    let duplicated: Vec<String> = names
        .iter()
        .filter(|n| !seen.insert(**n))
        .map(|n| n.to_string())
        .collect();
    let missing: Vec<String> = CHECK_NAMES
        .iter()
        .filter(|n| !names.contains(*n))
        .map(|n| n.to_string())
        .collect();
    let unexpected: Vec<String> = names
        .iter()
        .filter(|n| !CHECK_NAMES.iter().any(|c| c == *n))
        .map(|n| n.to_string())
        .collect();

    error!(
        actual = names.len(),
        expected = EXPECTED_CHECK_COUNT,
        ?missing,
        ?duplicated,
        ?unexpected,
        "Rules engine returned an inconsistent check set"
    );

    let diagnostic = CheckResult::fail(
        CONSISTENCY_CHECK_NAME,
        0.0,
        format!(
            "Expected {EXPECTED_CHECK_COUNT} uniquely named checks, got {} ({} unique)",
            names.len(),
            seen.len()
        ),
        Severity::Critical,
        RuleCategory::ContentQuality,
    )
    .with_metadata("expected_count", EXPECTED_CHECK_COUNT)
    .with_metadata("actual_count", names.len())
    .with_metadata("missing_checks", missing)
    .with_metadata("duplicate_checks", duplicated)
    .with_metadata("unexpected_checks", unexpected);

    let mut kept = HashSet::new();
    let mut deduped: Vec<CheckResult> = results
        .into_iter()
        .filter(|r| kept.insert(r.check_name.clone()))
        .collect();
    deduped.push(diagnostic);
    deduped
}
