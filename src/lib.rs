//! tagsift library crate (used by the CLI and integration tests).
//!
//! A rules-first quality gate for content tags. Eleven deterministic checks
//! score a `(content, tags)` submission, a weighted scorer turns the results
//! into one quality score, and a configurable strategy decides whether an
//! expensive external semantic judge should look at it.
//!
//! # Public API Surface
//!
//! ## Core
//! - [`RulesEngine`], [`CheckResult`] - The eleven-check catalog
//! - [`ConfigStore`] - Runtime-tunable rules, thresholds and invocation mode
//! - [`WeightedScorer`] - Aggregate quality score
//! - [`InvocationDecisionEngine`], [`InvocationMode`] - Judge escalation strategy
//!
//! ## Pipeline
//! - [`QualityGate`], [`GateOutcome`], [`FinalVerdict`] - Rules, score, decision
//!   and judge in one async call
//! - [`SemanticJudge`], [`JudgeVerdict`] - The judge seam
//!
//! ## Utilities
//! - [`SimilarityEngine`] - TF-IDF vectors and cosine similarity
//! - Text normalization in [`text`], content hashing in [`hashing`]
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod decision;
pub mod hashing;
pub mod judge;
pub mod pipeline;
pub mod rules;
pub mod scoring;
pub mod similarity;
pub mod store;
pub mod text;

pub use config::{Config, ConfigError};
pub use constants::{CHECK_NAMES, CONSISTENCY_CHECK_NAME, EXPECTED_CHECK_COUNT};
pub use decision::{
    DecisionError, InvocationDecision, InvocationDecisionEngine, InvocationMode,
    InvocationModeKind, InvocationSettings, RulesSummary,
};
pub use hashing::{content_fingerprint, hash_tags};
#[cfg(any(test, feature = "mock"))]
pub use judge::MockSemanticJudge;
pub use judge::{JudgeAssessment, JudgeError, JudgeResult, JudgeVerdict, SemanticJudge};
pub use pipeline::{FinalVerdict, GateOutcome, QualityGate};
pub use rules::{
    CheckResult, CheckStatus, DomainLexicon, EngineMetrics, RuleCategory, RuleError, RulesEngine,
    Severity,
};
pub use scoring::{ScoreBreakdown, WeightedScorer};
pub use similarity::SimilarityEngine;
pub use store::{
    ConfigChangeEvent, ConfigPersistence, ConfigSnapshot, ConfigStore, ConfigStoreError,
    JsonFilePersistence, NoopPersistence, RuleDefinition, ThresholdDefinition, UpdateOutcome,
};
