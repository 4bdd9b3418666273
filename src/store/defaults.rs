//! Built-in rule and threshold catalog.

use chrono::Utc;

use super::types::{RuleDefinition, ThresholdCategory, ThresholdDefinition};
use crate::constants::*;
use crate::rules::{RuleCategory, Severity};

struct ThresholdSpec {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    category: ThresholdCategory,
    default: f64,
    min: f64,
    max: f64,
    unit: &'static str,
    affects: &'static [&'static str],
}

const THRESHOLDS: &[ThresholdSpec] = &[
    ThresholdSpec {
        name: THRESHOLD_MIN_TAG_COUNT,
        display_name: "Minimum Tag Count",
        description: "Fewest tags a submission may carry",
        category: ThresholdCategory::Tags,
        default: 1.0,
        min: 0.0,
        max: 50.0,
        unit: "count",
        affects: &[CHECK_TAG_COUNT, CHECK_EMPTY_TAGS],
    },
    ThresholdSpec {
        name: THRESHOLD_MAX_TAG_COUNT,
        display_name: "Maximum Tag Count",
        description: "Most tags a submission may carry",
        category: ThresholdCategory::Tags,
        default: 20.0,
        min: 1.0,
        max: 100.0,
        unit: "count",
        affects: &[CHECK_TAG_COUNT],
    },
    ThresholdSpec {
        name: THRESHOLD_MIN_TEXT_LENGTH,
        display_name: "Minimum Text Length",
        description: "Shortest acceptable content, in characters",
        category: ThresholdCategory::Content,
        default: 50.0,
        min: 0.0,
        max: 10_000.0,
        unit: "characters",
        affects: &[CHECK_TEXT_QUALITY],
    },
    ThresholdSpec {
        name: THRESHOLD_MAX_TEXT_LENGTH,
        display_name: "Maximum Text Length",
        description: "Longest acceptable content, in characters",
        category: ThresholdCategory::Content,
        default: 10_000.0,
        min: 100.0,
        max: 1_000_000.0,
        unit: "characters",
        affects: &[CHECK_TEXT_QUALITY],
    },
    ThresholdSpec {
        name: THRESHOLD_MIN_MEANINGFUL_WORDS,
        display_name: "Minimum Meaningful Words",
        description: "Fewest words longer than two characters that are not pure digits",
        category: ThresholdCategory::Content,
        default: 5.0,
        min: 0.0,
        max: 1_000.0,
        unit: "count",
        affects: &[CHECK_TEXT_QUALITY],
    },
    ThresholdSpec {
        name: THRESHOLD_STOPWORD,
        display_name: "Stopword Ratio Threshold",
        description: "Largest tolerated share of generic tags",
        category: ThresholdCategory::Content,
        default: 0.5,
        min: 0.0,
        max: 1.0,
        unit: "ratio",
        affects: &[CHECK_STOPWORDS],
    },
    ThresholdSpec {
        name: THRESHOLD_SPAM,
        display_name: "Spam Detection Threshold",
        description: "Largest tolerated word-repetition ratio",
        category: ThresholdCategory::Content,
        default: 0.3,
        min: 0.0,
        max: 1.0,
        unit: "ratio",
        affects: &[CHECK_SPAM],
    },
    ThresholdSpec {
        name: THRESHOLD_MAX_DUPLICATES,
        display_name: "Maximum Duplicates Per Window",
        description: "Prior identical submissions allowed inside the duplicate window",
        category: ThresholdCategory::Duplicate,
        default: 5.0,
        min: 1.0,
        max: 1_000.0,
        unit: "count",
        affects: &[CHECK_DUPLICATE],
    },
    ThresholdSpec {
        name: THRESHOLD_DUPLICATE_WINDOW_HOURS,
        display_name: "Duplicate Window",
        description: "How long a submission is remembered for duplicate detection",
        category: ThresholdCategory::Duplicate,
        default: 24.0,
        min: 1.0,
        max: 168.0,
        unit: "hours",
        affects: &[CHECK_DUPLICATE],
    },
    ThresholdSpec {
        name: THRESHOLD_TAG_TEXT_RELEVANCE,
        display_name: "Tag-Text Relevance Threshold",
        description: "Minimum share of tags that appear in the content",
        category: ThresholdCategory::Semantic,
        default: 0.3,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[CHECK_TAG_TEXT_RELEVANCE],
    },
    ThresholdSpec {
        name: THRESHOLD_SEMANTIC_RELEVANCE,
        display_name: "Semantic Relevance Threshold",
        description: "Minimum blended TF-IDF similarity between content and tags",
        category: ThresholdCategory::Semantic,
        default: 0.15,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[CHECK_SEMANTIC_RELEVANCE],
    },
    ThresholdSpec {
        name: THRESHOLD_DOMAIN_RELEVANCE,
        display_name: "Domain Relevance Threshold",
        description: "Minimum share of tags matching a known domain",
        category: ThresholdCategory::Semantic,
        default: 0.1,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[CHECK_DOMAIN_RELEVANCE],
    },
    ThresholdSpec {
        name: THRESHOLD_TAG_SPECIFICITY,
        display_name: "Tag Specificity Threshold",
        description: "Minimum average tag specificity",
        category: ThresholdCategory::Semantic,
        default: 0.2,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[CHECK_TAG_SPECIFICITY],
    },
    ThresholdSpec {
        name: THRESHOLD_CONTEXT_COHERENCE,
        display_name: "Context Coherence Threshold",
        description: "Minimum mean pairwise similarity between tags",
        category: ThresholdCategory::Semantic,
        default: 0.1,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[CHECK_CONTEXT_COHERENCE],
    },
    ThresholdSpec {
        name: THRESHOLD_APPROVAL_QUALITY_SCORE,
        display_name: "Approval Quality Score",
        description: "Quality score at or above which a submission is approved",
        category: ThresholdCategory::Quality,
        default: 50.0,
        min: 0.0,
        max: 100.0,
        unit: "percentage",
        affects: &[],
    },
    ThresholdSpec {
        name: THRESHOLD_JUDGE_CONFIDENCE,
        display_name: "Judge Confidence Threshold",
        description: "Judge confidence at or above which its verdict is accepted",
        category: ThresholdCategory::Quality,
        default: 0.6,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[],
    },
    ThresholdSpec {
        name: THRESHOLD_INVOCATION_PERCENTAGE,
        display_name: "Percentage Mode Threshold",
        description: "Pass rate at or above which the judge is invoked",
        category: ThresholdCategory::Invocation,
        default: 85.0,
        min: 0.0,
        max: 100.0,
        unit: "percentage",
        affects: &[],
    },
    ThresholdSpec {
        name: THRESHOLD_INVOCATION_WEIGHTED,
        display_name: "Weighted Mode Threshold",
        description: "Weighted pass ratio at or above which the judge is invoked",
        category: ThresholdCategory::Invocation,
        default: 0.8,
        min: 0.0,
        max: 1.0,
        unit: "score",
        affects: &[],
    },
    ThresholdSpec {
        name: THRESHOLD_INVOCATION_RANGE_MIN,
        display_name: "Range Mode Lower Bound",
        description: "Pass rate at or below which submissions are auto-rejected",
        category: ThresholdCategory::Invocation,
        default: 70.0,
        min: 0.0,
        max: 100.0,
        unit: "percentage",
        affects: &[],
    },
    ThresholdSpec {
        name: THRESHOLD_INVOCATION_RANGE_MAX,
        display_name: "Range Mode Upper Bound",
        description: "Pass rate at or above which submissions are auto-approved",
        category: ThresholdCategory::Invocation,
        default: 80.0,
        min: 0.0,
        max: 100.0,
        unit: "percentage",
        affects: &[],
    },
];

struct RuleSpec {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    category: RuleCategory,
    severity: Severity,
    weight: f64,
    primary_threshold: &'static str,
    auto_fixable: bool,
}

const RULES: &[RuleSpec] = &[
    RuleSpec {
        name: CHECK_EMPTY_TAGS,
        display_name: "Empty Tags Check",
        description: "Content must carry at least one non-blank tag",
        category: RuleCategory::TagValidation,
        severity: Severity::High,
        weight: 1.0,
        primary_threshold: THRESHOLD_MIN_TAG_COUNT,
        auto_fixable: true,
    },
    RuleSpec {
        name: CHECK_TAG_COUNT,
        display_name: "Tag Count Validation",
        description: "Tag count must stay within the configured bounds",
        category: RuleCategory::TagValidation,
        severity: Severity::Medium,
        weight: 0.8,
        primary_threshold: THRESHOLD_MAX_TAG_COUNT,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_TEXT_QUALITY,
        display_name: "Text Quality Check",
        description: "Content length and meaningful word count",
        category: RuleCategory::ContentQuality,
        severity: Severity::High,
        weight: 1.2,
        primary_threshold: THRESHOLD_MIN_TEXT_LENGTH,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_STOPWORDS,
        display_name: "Stopwords Detection",
        description: "Detects tags made of generic or overly broad terms",
        category: RuleCategory::TagValidation,
        severity: Severity::Medium,
        weight: 0.6,
        primary_threshold: THRESHOLD_STOPWORD,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_SPAM,
        display_name: "Spam Pattern Detection",
        description: "Placeholder text, keyboard mashing and heavy repetition",
        category: RuleCategory::SpamDetection,
        severity: Severity::Critical,
        weight: 1.5,
        primary_threshold: THRESHOLD_SPAM,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_DUPLICATE,
        display_name: "Duplicate Content Detection",
        description: "Repeated submissions of the same content inside a time window",
        category: RuleCategory::DuplicateDetection,
        severity: Severity::Medium,
        weight: 0.9,
        primary_threshold: THRESHOLD_MAX_DUPLICATES,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_TAG_TEXT_RELEVANCE,
        display_name: "Tag-Text Relevance",
        description: "Tags should appear in the content",
        category: RuleCategory::SemanticAnalysis,
        severity: Severity::High,
        weight: 1.1,
        primary_threshold: THRESHOLD_TAG_TEXT_RELEVANCE,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_SEMANTIC_RELEVANCE,
        display_name: "Semantic Relevance",
        description: "TF-IDF similarity between the content and each tag",
        category: RuleCategory::SemanticAnalysis,
        severity: Severity::High,
        weight: 1.3,
        primary_threshold: THRESHOLD_SEMANTIC_RELEVANCE,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_DOMAIN_RELEVANCE,
        display_name: "Domain Relevance",
        description: "Tags should belong to a recognised business domain",
        category: RuleCategory::SemanticAnalysis,
        severity: Severity::Medium,
        weight: 1.0,
        primary_threshold: THRESHOLD_DOMAIN_RELEVANCE,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_TAG_SPECIFICITY,
        display_name: "Tag Specificity",
        description: "Tags should be specific rather than generic",
        category: RuleCategory::TagValidation,
        severity: Severity::Medium,
        weight: 0.8,
        primary_threshold: THRESHOLD_TAG_SPECIFICITY,
        auto_fixable: false,
    },
    RuleSpec {
        name: CHECK_CONTEXT_COHERENCE,
        display_name: "Context Coherence",
        description: "Tags should describe a common subject",
        category: RuleCategory::ContentQuality,
        severity: Severity::Medium,
        weight: 0.9,
        primary_threshold: THRESHOLD_CONTEXT_COHERENCE,
        auto_fixable: false,
    },
];

/// The default threshold catalog, in declaration order.
pub fn default_thresholds() -> Vec<ThresholdDefinition> {
    let now = Utc::now();
    THRESHOLDS
        .iter()
        .map(|spec| ThresholdDefinition {
            name: spec.name.to_string(),
            display_name: spec.display_name.to_string(),
            description: spec.description.to_string(),
            category: spec.category,
            current_value: spec.default,
            default_value: spec.default,
            min_value: spec.min,
            max_value: spec.max,
            unit: spec.unit.to_string(),
            affects_rules: spec.affects.iter().map(|r| r.to_string()).collect(),
            updated_at: now,
        })
        .collect()
}

/// The default rule catalog, in check order.
///
/// Each rule's `threshold_value` and bounds start from its primary threshold.
pub fn default_rules() -> Vec<RuleDefinition> {
    let now = Utc::now();
    RULES
        .iter()
        .map(|spec| {
            let (value, min, max) = THRESHOLDS
                .iter()
                .find(|t| t.name == spec.primary_threshold)
                .map(|t| (t.default, t.min, t.max))
                .unwrap_or((0.0, 0.0, 1.0));

            RuleDefinition {
                name: spec.name.to_string(),
                display_name: spec.display_name.to_string(),
                description: spec.description.to_string(),
                category: spec.category,
                severity: spec.severity,
                weight: spec.weight,
                default_weight: spec.weight,
                enabled: true,
                threshold_value: value,
                threshold_min: min,
                threshold_max: max,
                auto_fixable: spec.auto_fixable,
                updated_at: now,
            }
        })
        .collect()
}

/// Built-in default for `name`, used when a threshold is missing at read time.
pub fn default_threshold_value(name: &str) -> Option<f64> {
    THRESHOLDS.iter().find(|t| t.name == name).map(|t| t.default)
}
