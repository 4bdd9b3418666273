use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::decision::InvocationModeKind;
use crate::rules::{RuleCategory, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A quality rule with its tunable weight.
///
/// Rules are never removed; disable them instead.
pub struct RuleDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// Within `[0, 5]`.
    pub weight: f64,
    pub default_weight: f64,
    pub enabled: bool,
    /// Mirrors the threshold(s) that list this rule in `affects_rules`.
    pub threshold_value: f64,
    pub threshold_min: f64,
    pub threshold_max: f64,
    pub auto_fixable: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCategory {
    Tags,
    Content,
    Duplicate,
    Semantic,
    Quality,
    Invocation,
}

impl ThresholdCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ThresholdCategory::Tags => "tags",
            ThresholdCategory::Content => "content",
            ThresholdCategory::Duplicate => "duplicate",
            ThresholdCategory::Semantic => "semantic",
            ThresholdCategory::Quality => "quality",
            ThresholdCategory::Invocation => "invocation",
        }
    }
}

impl fmt::Display for ThresholdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A named numeric threshold. `min_value <= current_value <= max_value` always holds.
pub struct ThresholdDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: ThresholdCategory,
    pub current_value: f64,
    pub default_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub unit: String,
    pub affects_rules: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl ThresholdDefinition {
    /// Returns `true` if `value` is within `[min_value, max_value]`.
    pub fn accepts(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Threshold,
    RuleWeight,
    RuleEnabled,
    InvocationMode,
    Import,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Threshold => "threshold",
            ChangeKind::RuleWeight => "rule_weight",
            ChangeKind::RuleEnabled => "rule_enabled",
            ChangeKind::InvocationMode => "invocation_mode",
            ChangeKind::Import => "import",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One applied configuration change. Append-only.
pub struct ConfigChangeEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: ChangeKind,
    pub item_name: String,
    pub field_name: String,
    pub old_value: Value,
    pub new_value: Value,
    pub changed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ConfigChangeEvent {
    pub(crate) fn new(
        kind: ChangeKind,
        item_name: &str,
        field_name: &str,
        old_value: Value,
        new_value: Value,
        changed_by: &str,
        reason: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            item_name: item_name.to_string(),
            field_name: field_name.to_string(),
            old_value,
            new_value,
            changed_by: changed_by.to_string(),
            reason: reason.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Result of an accepted update.
pub enum UpdateOutcome {
    /// The value changed; history, persistence and subscribers were updated.
    Applied,
    /// The value already matched; nothing was recorded.
    Unchanged,
}

impl UpdateOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One entry of a [`bulk_update`](super::ConfigStore::bulk_update) batch.
pub enum ConfigUpdate {
    Threshold { name: String, value: f64 },
    RuleWeight { name: String, weight: f64 },
    RuleEnabled { name: String, enabled: bool },
}

impl ConfigUpdate {
    pub fn name(&self) -> &str {
        match self {
            ConfigUpdate::Threshold { name, .. }
            | ConfigUpdate::RuleWeight { name, .. }
            | ConfigUpdate::RuleEnabled { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Full configuration state; the unit of export, import and persistence.
pub struct ConfigSnapshot {
    pub rules: Vec<RuleDefinition>,
    pub thresholds: Vec<ThresholdDefinition>,
    #[serde(default)]
    pub invocation_mode: InvocationModeKind,
    pub exported_at: DateTime<Utc>,
}

/// Identifies a subscriber for [`unsubscribe`](super::ConfigStore::unsubscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}
