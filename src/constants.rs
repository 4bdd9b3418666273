//! Cross-cutting, shared constants.
//!
//! Check names and threshold keys are shared by the rules catalog, the
//! configuration store and the decision engine. Prefer these constants over
//! string literals so a rename cannot drift between modules.
//!
//! # Catalog Invariant
//!
//! [`CHECK_NAMES`] is the fixed, ordered catalog. The rules engine always returns
//! exactly [`EXPECTED_CHECK_COUNT`] results in this order; anything else is a
//! programming error surfaced through [`CONSISTENCY_CHECK_NAME`].

pub const CHECK_EMPTY_TAGS: &str = "empty_tags";
pub const CHECK_TAG_COUNT: &str = "tag_count_validation";
pub const CHECK_TEXT_QUALITY: &str = "text_quality";
pub const CHECK_STOPWORDS: &str = "stopwords_detection";
pub const CHECK_SPAM: &str = "spam_patterns";
pub const CHECK_DUPLICATE: &str = "duplicate_content_detection";
pub const CHECK_TAG_TEXT_RELEVANCE: &str = "tag_text_relevance";
pub const CHECK_SEMANTIC_RELEVANCE: &str = "semantic_relevance";
pub const CHECK_DOMAIN_RELEVANCE: &str = "domain_relevance";
pub const CHECK_TAG_SPECIFICITY: &str = "tag_specificity";
pub const CHECK_CONTEXT_COHERENCE: &str = "context_coherence";

/// The fixed check catalog, in evaluation order.
pub const CHECK_NAMES: [&str; EXPECTED_CHECK_COUNT] = [
    CHECK_EMPTY_TAGS,
    CHECK_TAG_COUNT,
    CHECK_TEXT_QUALITY,
    CHECK_STOPWORDS,
    CHECK_SPAM,
    CHECK_DUPLICATE,
    CHECK_TAG_TEXT_RELEVANCE,
    CHECK_SEMANTIC_RELEVANCE,
    CHECK_DOMAIN_RELEVANCE,
    CHECK_TAG_SPECIFICITY,
    CHECK_CONTEXT_COHERENCE,
];

pub const EXPECTED_CHECK_COUNT: usize = 11;

/// Name of the synthetic result appended when the catalog invariant is violated.
pub const CONSISTENCY_CHECK_NAME: &str = "rules_engine_consistency_check";

pub const THRESHOLD_MIN_TAG_COUNT: &str = "min_tag_count";
pub const THRESHOLD_MAX_TAG_COUNT: &str = "max_tag_count";
pub const THRESHOLD_MIN_TEXT_LENGTH: &str = "min_text_length";
pub const THRESHOLD_MAX_TEXT_LENGTH: &str = "max_text_length";
pub const THRESHOLD_MIN_MEANINGFUL_WORDS: &str = "min_meaningful_words";
pub const THRESHOLD_STOPWORD: &str = "stopword_threshold";
pub const THRESHOLD_SPAM: &str = "spam_threshold";
pub const THRESHOLD_MAX_DUPLICATES: &str = "max_duplicate_content_per_hour";
pub const THRESHOLD_DUPLICATE_WINDOW_HOURS: &str = "duplicate_window_hours";
pub const THRESHOLD_TAG_TEXT_RELEVANCE: &str = "tag_text_relevance_threshold";
pub const THRESHOLD_SEMANTIC_RELEVANCE: &str = "semantic_relevance_threshold";
pub const THRESHOLD_DOMAIN_RELEVANCE: &str = "domain_relevance_threshold";
pub const THRESHOLD_TAG_SPECIFICITY: &str = "tag_specificity_threshold";
pub const THRESHOLD_CONTEXT_COHERENCE: &str = "context_coherence_threshold";
pub const THRESHOLD_APPROVAL_QUALITY_SCORE: &str = "approval_quality_score_threshold";
pub const THRESHOLD_JUDGE_CONFIDENCE: &str = "llm_confidence_threshold";
pub const THRESHOLD_INVOCATION_PERCENTAGE: &str = "llm_percentage_threshold";
pub const THRESHOLD_INVOCATION_WEIGHTED: &str = "llm_weighted_threshold";
pub const THRESHOLD_INVOCATION_RANGE_MIN: &str = "llm_range_min_threshold";
pub const THRESHOLD_INVOCATION_RANGE_MAX: &str = "llm_range_max_threshold";

/// Inclusive bounds every rule weight must satisfy.
pub const MIN_RULE_WEIGHT: f64 = 0.0;
pub const MAX_RULE_WEIGHT: f64 = 5.0;

/// Weight assumed for a check with no entry in a weight map.
pub const DEFAULT_RULE_WEIGHT: f64 = 1.0;

/// Confidence assigned to a check that failed internally.
pub const CHECK_ERROR_CONFIDENCE: f64 = 0.3;

/// Default caller-side timeout for a semantic-judge call.
pub const DEFAULT_JUDGE_TIMEOUT_MS: u64 = 30_000;

/// Default number of distinct content fingerprints kept in the duplicate window.
pub const DEFAULT_DUPLICATE_CAPACITY: usize = 100_000;

/// Version tag stamped on every check result.
pub const RULES_ENGINE_VERSION: &str = "v2.0_consistent";
