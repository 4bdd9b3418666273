//! Deterministic in-process judge for tests and local runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{JudgeAssessment, JudgeError, JudgeResult, JudgeVerdict, SemanticJudge};
use crate::text::tokenize;

#[derive(Debug, Clone)]
enum Behavior {
    Overlap,
    Fixed(JudgeVerdict),
    Fail(String),
}

/// Judge that answers from token overlap, a fixed verdict, or a fixed error.
///
/// The default behavior scores the share of tags sharing a token with the
/// content: `>= 0.5` is `Accurate`, `0` is `Inaccurate`, anything else
/// `Uncertain`.
#[derive(Debug)]
pub struct MockSemanticJudge {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl Default for MockSemanticJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSemanticJudge {
    pub fn new() -> Self {
        Self {
            behavior: Behavior::Overlap,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns `verdict`.
    pub fn fixed(verdict: JudgeVerdict) -> Self {
        Self {
            behavior: Behavior::Fixed(verdict),
            ..Self::new()
        }
    }

    /// Always fails with [`JudgeError::Unavailable`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            ..Self::new()
        }
    }

    /// Sleeps before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `judge` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SemanticJudge for MockSemanticJudge {
    async fn judge(&self, content: &str, tags: &[String]) -> JudgeResult<JudgeVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Fixed(verdict) => Ok(verdict.clone()),
            Behavior::Fail(message) => Err(JudgeError::Unavailable {
                message: message.clone(),
            }),
            Behavior::Overlap => Ok(overlap_verdict(content, tags)),
        }
    }
}

fn overlap_verdict(content: &str, tags: &[String]) -> JudgeVerdict {
    if tags.is_empty() {
        return JudgeVerdict::new(JudgeAssessment::Inaccurate, 0.0, "no tags to judge");
    }

    let words: std::collections::HashSet<String> = tokenize(content).into_iter().collect();
    let matching = tags
        .iter()
        .filter(|tag| tokenize(tag).iter().any(|t| words.contains(t)))
        .count();
    let share = matching as f64 / tags.len() as f64;

    let assessment = if share >= 0.5 {
        JudgeAssessment::Accurate
    } else if matching == 0 {
        JudgeAssessment::Inaccurate
    } else {
        JudgeAssessment::Uncertain
    };

    JudgeVerdict::new(
        assessment,
        share,
        format!("{matching} of {} tags appear in the content", tags.len()),
    )
}
