//! Point-in-time threshold values read by the checks.

use std::collections::HashMap;

use super::error::{RuleError, RuleResult};
use crate::store::{ConfigStore, default_threshold_value};

/// Threshold values captured once per evaluation.
///
/// Every check in one run sees the same values even if the store changes
/// mid-run. Names missing from the snapshot fall back to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ThresholdSnapshot {
    values: HashMap<String, f64>,
}

impl ThresholdSnapshot {
    /// Captures the current values from `store`.
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            values: store.threshold_values(),
        }
    }

    /// Wraps an explicit value map.
    pub fn from_values(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Overrides one value.
    pub fn with_value(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    /// Returns the value for `name`, falling back to its default.
    pub fn get(&self, name: &str) -> RuleResult<f64> {
        self.values
            .get(name)
            .copied()
            .or_else(|| default_threshold_value(name))
            .ok_or_else(|| RuleError::MissingThreshold {
                name: name.to_string(),
            })
    }
}
