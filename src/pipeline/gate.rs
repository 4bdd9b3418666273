use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinError;
use tracing::{debug, error, info, instrument, warn};

use super::types::{FinalVerdict, GateOutcome};
use crate::config::Config;
use crate::constants::{
    CONSISTENCY_CHECK_NAME, DEFAULT_JUDGE_TIMEOUT_MS, THRESHOLD_APPROVAL_QUALITY_SCORE, THRESHOLD_JUDGE_CONFIDENCE,
};
use crate::decision::InvocationDecisionEngine;
use crate::hashing::{content_fingerprint, hash_tags};
use crate::judge::{JudgeError, JudgeResult, JudgeVerdict, SemanticJudge};
use crate::rules::{CheckResult, RuleCategory, RulesEngine, Severity};
use crate::scoring::WeightedScorer;
use crate::store::{ConfigStore, default_threshold_value};

/// Rules, score, invocation decision and optional semantic judge, in that order.
///
/// The judge is only called when the decision says so, and never for longer
/// than the configured timeout.
#[derive(Clone)]
pub struct QualityGate {
    engine: Arc<RulesEngine>,
    scorer: WeightedScorer,
    decider: InvocationDecisionEngine,
    judge: Option<Arc<dyn SemanticJudge>>,
    judge_timeout: Duration,
}

impl fmt::Debug for QualityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualityGate")
            .field("engine", &self.engine)
            .field("scorer", &self.scorer)
            .field("has_judge", &self.judge.is_some())
            .field("judge_timeout", &self.judge_timeout)
            .finish()
    }
}

impl QualityGate {
    pub fn new(engine: Arc<RulesEngine>) -> Self {
        Self {
            engine,
            scorer: WeightedScorer::default(),
            decider: InvocationDecisionEngine::new(),
            judge: None,
            judge_timeout: Duration::from_millis(DEFAULT_JUDGE_TIMEOUT_MS),
        }
    }

    pub fn from_config(engine: Arc<RulesEngine>, config: &Config) -> Self {
        Self::new(engine).with_judge_timeout(config.judge_timeout)
    }

    pub fn with_judge(mut self, judge: Arc<dyn SemanticJudge>) -> Self {
        self.judge = Some(judge);
        self
    }

    pub fn with_judge_timeout(mut self, timeout: Duration) -> Self {
        self.judge_timeout = timeout;
        self
    }

    pub fn engine(&self) -> &Arc<RulesEngine> {
        &self.engine
    }

    pub fn judge_timeout(&self) -> Duration {
        self.judge_timeout
    }

    /// Evaluates one submission end to end.
    #[instrument(
        skip_all,
        fields(submission_id = tracing::field::Empty, content_len = content.len(), tags = tags.len())
    )]
    pub async fn evaluate(&self, content: &str, tags: &[String]) -> GateOutcome {
        let start = Instant::now();
        let submission_id = format!(
            "{:016x}-{:016x}",
            content_fingerprint(content),
            hash_tags(tags)
        );
        tracing::Span::current().record("submission_id", submission_id.as_str());
        let store = self.engine.store();

        let results = self.run_checks(content, tags).await;
        let weights = store.rule_weights();
        let score = self.scorer.breakdown(&results, &weights);
        let quality_score = score.quality_score();
        let decision = self.decider.evaluate(&results, &store.invocation_settings());

        let approval_threshold = threshold(store, THRESHOLD_APPROVAL_QUALITY_SCORE);
        let confidence_threshold = threshold(store, THRESHOLD_JUDGE_CONFIDENCE);

        let (judge_verdict, judge_error) = if decision.should_invoke {
            match self.consult_judge(content, tags).await {
                Ok(verdict) => (Some(verdict), None),
                Err(e) => {
                    warn!(error = %e, "Semantic judge gave no verdict");
                    (None, Some(e.to_string()))
                }
            }
        } else {
            debug!(reason = %decision.reason, "Semantic judge not invoked");
            (None, None)
        };

        let final_verdict = final_verdict(
            decision.should_invoke,
            judge_verdict.as_ref(),
            quality_score,
            approval_threshold,
            confidence_threshold,
        );

        info!(
            quality_score,
            should_invoke = decision.should_invoke,
            verdict = %final_verdict,
            "Submission evaluated"
        );

        GateOutcome {
            submission_id,
            results,
            score,
            quality_score,
            decision,
            judge_verdict,
            judge_error,
            final_verdict,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Runs the rules off the async workers; the checks are CPU-bound.
    async fn run_checks(&self, content: &str, tags: &[String]) -> Vec<CheckResult> {
        let engine = Arc::clone(&self.engine);
        let content = content.to_string();
        let tags = tags.to_vec();
        let span = tracing::Span::current();

        tokio::task::spawn_blocking(move || span.in_scope(|| engine.check(&content, &tags)))
            .await
            .unwrap_or_else(|e| rules_task_failed(&e))
    }

    async fn consult_judge(&self, content: &str, tags: &[String]) -> JudgeResult<JudgeVerdict> {
        let Some(judge) = &self.judge else {
            return Err(JudgeError::Unavailable {
                message: "no semantic judge configured".to_string(),
            });
        };

        match tokio::time::timeout(self.judge_timeout, judge.judge(content, tags)).await {
            Ok(result) => result,
            Err(_) => Err(JudgeError::Timeout {
                timeout_ms: u64::try_from(self.judge_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

/// Single critical diagnostic standing in for the results of a rules task
/// that panicked or was cancelled.
pub(crate) fn rules_task_failed(err: &JoinError) -> Vec<CheckResult> {
    error!(error = %err, "Rules task failed");
    vec![
        CheckResult::fail(
            CONSISTENCY_CHECK_NAME,
            0.0,
            format!("Rules engine task failed: {err}"),
            Severity::Critical,
            RuleCategory::ContentQuality,
        )
        .with_metadata("task_panicked", err.is_panic())
        .with_metadata("task_cancelled", err.is_cancelled()),
    ]
}

fn threshold(store: &ConfigStore, name: &str) -> f64 {
    store
        .get_threshold(name)
        .or_else(|| default_threshold_value(name))
        .unwrap_or_default()
}

/// Combines the quality score with the judge's answer.
///
/// Without a judge call the score alone decides. A judge rejection flags the
/// submission; an acceptance approves it unless the score is below the
/// approval threshold, which sends it to review. A wanted but missing verdict
/// also goes to review.
pub(crate) fn final_verdict(
    judge_wanted: bool,
    verdict: Option<&JudgeVerdict>,
    quality_score: f64,
    approval_threshold: f64,
    confidence_threshold: f64,
) -> FinalVerdict {
    let score_approves = quality_score >= approval_threshold;

    match (judge_wanted, verdict) {
        (false, _) if score_approves => FinalVerdict::Approved,
        (false, _) => FinalVerdict::Flagged,
        (true, None) => FinalVerdict::NeedsReview,
        (true, Some(v)) if !v.accepts(confidence_threshold) => FinalVerdict::Flagged,
        (true, Some(_)) if score_approves => FinalVerdict::Approved,
        (true, Some(_)) => FinalVerdict::NeedsReview,
    }
}
