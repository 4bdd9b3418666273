use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Outcome of a single check.
pub enum CheckStatus {
    /// The content satisfied the check.
    Pass,
    /// The content violated the check.
    Fail,
    /// Borderline; counted as not passed by the decision engine.
    Warning,
}

impl CheckStatus {
    /// Returns `true` only for [`CheckStatus::Pass`].
    pub fn is_pass(self) -> bool {
        matches!(self, CheckStatus::Pass)
    }

    /// Lowercase name used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
            CheckStatus::Warning => "warning",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How serious a failed check is.
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Grouping used for rule definitions and check results.
pub enum RuleCategory {
    ContentQuality,
    TagValidation,
    SemanticAnalysis,
    SpamDetection,
    DuplicateDetection,
    DomainSpecific,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::ContentQuality => "content_quality",
            RuleCategory::TagValidation => "tag_validation",
            RuleCategory::SemanticAnalysis => "semantic_analysis",
            RuleCategory::SpamDetection => "spam_detection",
            RuleCategory::DuplicateDetection => "duplicate_detection",
            RuleCategory::DomainSpecific => "domain_specific",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of one quality check for one submission.
pub struct CheckResult {
    pub check_name: String,
    pub status: CheckStatus,
    /// Always within `[0, 1]`.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub severity: Severity,
    pub category: RuleCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub auto_fixable: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl CheckResult {
    fn new(
        check_name: impl Into<String>,
        status: CheckStatus,
        confidence: f64,
        severity: Severity,
        category: RuleCategory,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            status,
            confidence_score: clamp_confidence(confidence),
            failure_reason: None,
            severity,
            category,
            suggestion: None,
            auto_fixable: false,
            metadata: Map::new(),
        }
    }

    /// A passing result.
    pub fn pass(
        check_name: impl Into<String>,
        confidence: f64,
        severity: Severity,
        category: RuleCategory,
    ) -> Self {
        Self::new(check_name, CheckStatus::Pass, confidence, severity, category)
    }

    /// A failing result with the reason it failed.
    pub fn fail(
        check_name: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
        severity: Severity,
        category: RuleCategory,
    ) -> Self {
        let mut result = Self::new(check_name, CheckStatus::Fail, confidence, severity, category);
        result.failure_reason = Some(reason.into());
        result
    }

    /// A borderline result.
    pub fn warning(
        check_name: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
        severity: Severity,
        category: RuleCategory,
    ) -> Self {
        let mut result = Self::new(
            check_name,
            CheckStatus::Warning,
            confidence,
            severity,
            category,
        );
        result.failure_reason = Some(reason.into());
        result
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_auto_fixable(mut self, auto_fixable: bool) -> Self {
        self.auto_fixable = auto_fixable;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Returns `true` if the status is [`CheckStatus::Pass`].
    pub fn passed(&self) -> bool {
        self.status.is_pass()
    }
}

/// Clamps into `[0, 1]`, mapping NaN to `0.0`.
#[inline]
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
