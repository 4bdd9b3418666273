//! The fixed check catalog.
//!
//! Every check is a plain function of a [`CheckContext`]. Checks never panic on
//! well-formed input and report configuration problems as [`RuleError`]s,
//! which the engine converts into failing results.
//!
//! | # | check | reads |
//! |---|-------|-------|
//! | 1 | `empty_tags` | tags |
//! | 2 | `tag_count_validation` | `min_tag_count`, `max_tag_count` |
//! | 3 | `text_quality` | `min_text_length`, `max_text_length`, `min_meaningful_words` |
//! | 4 | `stopwords_detection` | `stopword_threshold` |
//! | 5 | `spam_patterns` | `spam_threshold` |
//! | 6 | `duplicate_content_detection` | `max_duplicate_content_per_hour`, `duplicate_window_hours` |
//! | 7 | `tag_text_relevance` | `tag_text_relevance_threshold` |
//! | 8 | `semantic_relevance` | `semantic_relevance_threshold` |
//! | 9 | `domain_relevance` | `domain_relevance_threshold` |
//! | 10 | `tag_specificity` | `tag_specificity_threshold` |
//! | 11 | `context_coherence` | `context_coherence_threshold` |

mod content;
mod relevance;
mod spam;
mod tags;

pub use content::{duplicate_content, text_quality};
pub use relevance::{context_coherence, domain_relevance, semantic_relevance, tag_text_relevance};
pub use spam::spam_patterns;
pub use tags::{empty_tags, stopwords, tag_count, tag_specificity};

use chrono::{DateTime, Utc};

use super::duplicate::DuplicateTracker;
use super::error::RuleResult;
use super::lexicon::DomainLexicon;
use super::thresholds::ThresholdSnapshot;
use super::types::{CheckResult, RuleCategory};
use crate::constants::*;
use crate::similarity::SimilarityEngine;

/// Everything a check may read for one submission.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub content: &'a str,
    pub tags: &'a [String],
    pub thresholds: &'a ThresholdSnapshot,
    pub similarity: &'a SimilarityEngine,
    pub lexicon: &'a DomainLexicon,
    pub duplicates: &'a DuplicateTracker,
    pub now: DateTime<Utc>,
}

/// Signature shared by every catalog entry.
pub type CheckFn = fn(&CheckContext<'_>) -> RuleResult<CheckResult>;

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CheckSpec {
    pub name: &'static str,
    pub category: RuleCategory,
    pub run: CheckFn,
}

/// The eleven checks, in evaluation order.
pub const CATALOG: [CheckSpec; EXPECTED_CHECK_COUNT] = [
    CheckSpec {
        name: CHECK_EMPTY_TAGS,
        category: RuleCategory::TagValidation,
        run: empty_tags,
    },
    CheckSpec {
        name: CHECK_TAG_COUNT,
        category: RuleCategory::TagValidation,
        run: tag_count,
    },
    CheckSpec {
        name: CHECK_TEXT_QUALITY,
        category: RuleCategory::ContentQuality,
        run: text_quality,
    },
    CheckSpec {
        name: CHECK_STOPWORDS,
        category: RuleCategory::TagValidation,
        run: stopwords,
    },
    CheckSpec {
        name: CHECK_SPAM,
        category: RuleCategory::SpamDetection,
        run: spam_patterns,
    },
    CheckSpec {
        name: CHECK_DUPLICATE,
        category: RuleCategory::DuplicateDetection,
        run: duplicate_content,
    },
    CheckSpec {
        name: CHECK_TAG_TEXT_RELEVANCE,
        category: RuleCategory::SemanticAnalysis,
        run: tag_text_relevance,
    },
    CheckSpec {
        name: CHECK_SEMANTIC_RELEVANCE,
        category: RuleCategory::SemanticAnalysis,
        run: semantic_relevance,
    },
    CheckSpec {
        name: CHECK_DOMAIN_RELEVANCE,
        category: RuleCategory::SemanticAnalysis,
        run: domain_relevance,
    },
    CheckSpec {
        name: CHECK_TAG_SPECIFICITY,
        category: RuleCategory::TagValidation,
        run: tag_specificity,
    },
    CheckSpec {
        name: CHECK_CONTEXT_COHERENCE,
        category: RuleCategory::ContentQuality,
        run: context_coherence,
    },
];

/// Category of a catalog check, or `ContentQuality` for unknown names.
pub fn category_of(name: &str) -> RuleCategory {
    CATALOG
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.category)
        .unwrap_or(RuleCategory::ContentQuality)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn preview<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .take(3)
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
