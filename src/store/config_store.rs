use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::{ReentrantMutex, RwLock};
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::defaults::{default_rules, default_threshold_value, default_thresholds};
use super::error::{ConfigStoreError, ConfigStoreResult};
use super::persistence::{ConfigPersistence, JsonFilePersistence, NoopPersistence};
use super::types::{
    ChangeKind, ConfigChangeEvent, ConfigSnapshot, ConfigUpdate, RuleDefinition,
    SubscriptionId, ThresholdCategory, ThresholdDefinition, UpdateOutcome,
};
use crate::config::Config;
use crate::constants::{
    MAX_RULE_WEIGHT, MIN_RULE_WEIGHT, THRESHOLD_INVOCATION_PERCENTAGE,
    THRESHOLD_INVOCATION_RANGE_MAX, THRESHOLD_INVOCATION_RANGE_MIN, THRESHOLD_INVOCATION_WEIGHTED,
};
use crate::decision::{InvocationMode, InvocationModeKind, InvocationSettings};
use crate::rules::RuleCategory;

/// Change events kept in memory; older ones are dropped first.
pub const MAX_HISTORY_EVENTS: usize = 10_000;

/// Callback invoked synchronously after every applied change.
///
/// Errors and panics are logged and never reach the writer.
pub type ConfigSubscriber = Arc<dyn Fn(&ConfigChangeEvent) -> anyhow::Result<()> + Send + Sync>;

struct StoreState {
    rules: BTreeMap<String, RuleDefinition>,
    thresholds: BTreeMap<String, ThresholdDefinition>,
    invocation_mode: InvocationModeKind,
    history: VecDeque<ConfigChangeEvent>,
}

impl StoreState {
    fn defaults() -> Self {
        Self {
            rules: default_rules()
                .into_iter()
                .map(|r| (r.name.clone(), r))
                .collect(),
            thresholds: default_thresholds()
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
            invocation_mode: InvocationModeKind::default(),
            history: VecDeque::new(),
        }
    }

    fn apply_snapshot(&mut self, snapshot: ConfigSnapshot) {
        self.rules = snapshot
            .rules
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();
        self.thresholds = snapshot
            .thresholds
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        self.invocation_mode = snapshot.invocation_mode;
    }

    fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            rules: self.rules.values().cloned().collect(),
            thresholds: self.thresholds.values().cloned().collect(),
            invocation_mode: self.invocation_mode,
            exported_at: Utc::now(),
        }
    }

    fn record(&mut self, event: ConfigChangeEvent) {
        self.history.push_back(event);
        while self.history.len() > MAX_HISTORY_EVENTS {
            self.history.pop_front();
        }
    }

    fn threshold_value(&self, name: &str) -> f64 {
        self.thresholds
            .get(name)
            .map(|t| t.current_value)
            .or_else(|| default_threshold_value(name))
            .unwrap_or_default()
    }

    /// Range mode bounds as they would be after setting `name` to `value`.
    /// `None` when `name` is neither range threshold.
    fn range_bounds_with(&self, name: &str, value: f64) -> Option<(f64, f64)> {
        match name {
            THRESHOLD_INVOCATION_RANGE_MIN => {
                Some((value, self.threshold_value(THRESHOLD_INVOCATION_RANGE_MAX)))
            }
            THRESHOLD_INVOCATION_RANGE_MAX => {
                Some((self.threshold_value(THRESHOLD_INVOCATION_RANGE_MIN), value))
            }
            _ => None,
        }
    }

    fn rule_weights(&self) -> HashMap<String, f64> {
        self.rules
            .values()
            .map(|r| (r.name.clone(), if r.enabled { r.weight } else { 0.0 }))
            .collect()
    }
}

/// Single source of truth for rule weights, thresholds and the invocation mode.
///
/// Writers are serialized by one re-entrant lock, so validate, apply, record,
/// persist and notify happen atomically relative to other writers. Subscribers
/// may call back into the store. Readers only take a short read lock.
pub struct ConfigStore {
    state: RwLock<StoreState>,
    writer: ReentrantMutex<()>,
    subscribers: RwLock<BTreeMap<SubscriptionId, ConfigSubscriber>>,
    next_subscription: AtomicU64,
    persistence: Arc<dyn ConfigPersistence>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ConfigStore")
            .field("rules", &state.rules.len())
            .field("thresholds", &state.thresholds.len())
            .field("invocation_mode", &state.invocation_mode)
            .field("history", &state.history.len())
            .field("subscribers", &self.subscribers.read().len())
            .field("persistence", &self.persistence)
            .finish()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// In-memory store with the built-in catalog.
    pub fn new() -> Self {
        Self::with_persistence(Arc::new(NoopPersistence))
    }

    /// Store backed by `persistence`.
    ///
    /// A saved snapshot that fails validation, or cannot be read, is ignored in
    /// favour of the built-in catalog.
    pub fn with_persistence(persistence: Arc<dyn ConfigPersistence>) -> Self {
        let mut state = StoreState::defaults();

        match persistence.load_snapshot() {
            Ok(Some(snapshot)) => match validate_snapshot(&snapshot) {
                Ok(()) => {
                    info!(
                        rules = snapshot.rules.len(),
                        thresholds = snapshot.thresholds.len(),
                        "Restored configuration snapshot"
                    );
                    state.apply_snapshot(snapshot);
                }
                Err(e) => warn!(error = %e, "Saved configuration rejected; using defaults"),
            },
            Ok(None) => debug!("No saved configuration; using defaults"),
            Err(e) => warn!(error = %e, "Failed to load configuration; using defaults"),
        }

        match persistence.load_history() {
            Ok(events) => events.into_iter().for_each(|e| state.record(e)),
            Err(e) => warn!(error = %e, "Failed to load configuration history"),
        }

        Self {
            state: RwLock::new(state),
            writer: ReentrantMutex::new(()),
            subscribers: RwLock::new(BTreeMap::new()),
            next_subscription: AtomicU64::new(1),
            persistence,
        }
    }

    /// Store configured from [`Config`]: file-backed when `config_path` is set,
    /// with the invocation mode override applied.
    pub fn from_config(config: &Config) -> Self {
        let persistence: Arc<dyn ConfigPersistence> = match &config.config_path {
            Some(path) => Arc::new(JsonFilePersistence::new(
                path.clone(),
                config.history_path.clone(),
            )),
            None => Arc::new(NoopPersistence),
        };
        let store = Self::with_persistence(persistence);

        if let Some(mode) = config.invocation_mode
            && let Err(e) =
                store.set_invocation_mode(mode, "environment", Some("TAGSIFT_INVOCATION_MODE"))
        {
            warn!(error = %e, "Failed to apply invocation mode override");
        }

        store
    }

    // ----- reads -----

    pub fn get_threshold(&self, name: &str) -> Option<f64> {
        self.state.read().thresholds.get(name).map(|t| t.current_value)
    }

    pub fn threshold_definition(&self, name: &str) -> Option<ThresholdDefinition> {
        self.state.read().thresholds.get(name).cloned()
    }

    pub fn get_rule(&self, name: &str) -> Option<RuleDefinition> {
        self.state.read().rules.get(name).cloned()
    }

    /// All rules, sorted by name.
    pub fn rules(&self) -> Vec<RuleDefinition> {
        self.state.read().rules.values().cloned().collect()
    }

    /// All thresholds, sorted by name.
    pub fn thresholds(&self) -> Vec<ThresholdDefinition> {
        self.state.read().thresholds.values().cloned().collect()
    }

    pub fn rules_by_category(&self, category: RuleCategory) -> Vec<RuleDefinition> {
        self.state
            .read()
            .rules
            .values()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }

    pub fn thresholds_by_category(&self, category: ThresholdCategory) -> Vec<ThresholdDefinition> {
        self.state
            .read()
            .thresholds
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Current value of every threshold, in one read.
    pub fn threshold_values(&self) -> HashMap<String, f64> {
        self.state
            .read()
            .thresholds
            .values()
            .map(|t| (t.name.clone(), t.current_value))
            .collect()
    }

    /// Weight per rule; disabled rules weigh `0.0`.
    pub fn rule_weights(&self) -> HashMap<String, f64> {
        self.state.read().rule_weights()
    }

    pub fn invocation_mode(&self) -> InvocationModeKind {
        self.state.read().invocation_mode
    }

    /// Invocation settings built from the current mode, its thresholds and the
    /// rule weights. Writes keep the range bounds ordered, so the binary
    /// fallback only covers settings the decision engine still rejects.
    pub fn invocation_settings(&self) -> InvocationSettings {
        let (mode, weights) = {
            let state = self.state.read();
            let mode = match state.invocation_mode {
                InvocationModeKind::Binary => InvocationMode::Binary,
                InvocationModeKind::Percentage => InvocationMode::Percentage {
                    threshold: state.threshold_value(THRESHOLD_INVOCATION_PERCENTAGE),
                },
                InvocationModeKind::Weighted => InvocationMode::Weighted {
                    threshold: state.threshold_value(THRESHOLD_INVOCATION_WEIGHTED),
                },
                InvocationModeKind::Range => InvocationMode::Range {
                    min: state.threshold_value(THRESHOLD_INVOCATION_RANGE_MIN),
                    max: state.threshold_value(THRESHOLD_INVOCATION_RANGE_MAX),
                },
            };
            (mode, state.rule_weights())
        };

        match InvocationSettings::new(mode, weights.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, mode = %mode.kind(), "Invalid invocation settings; using binary");
                InvocationSettings::new(InvocationMode::Binary, weights).unwrap_or_default()
            }
        }
    }

    /// Most recent `limit` change events, newest first.
    pub fn history(&self, limit: usize) -> Vec<ConfigChangeEvent> {
        self.state
            .read()
            .history
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn export(&self) -> ConfigSnapshot {
        self.state.read().snapshot()
    }

    // ----- writes -----

    /// Sets a threshold and mirrors it into every rule in `affects_rules`.
    ///
    /// The range mode bounds must stay ordered: a value that would leave
    /// `min >= max` is rejected with [`ConfigStoreError::InvalidRange`].
    pub fn update_threshold(
        &self,
        name: &str,
        value: f64,
        changed_by: &str,
        reason: Option<&str>,
    ) -> ConfigStoreResult<UpdateOutcome> {
        let _writer = self.writer.lock();
        ensure_finite(name, value)?;

        let event = {
            let mut state = self.state.write();
            if let Some((min, max)) = state.range_bounds_with(name, value)
                && min >= max
            {
                return Err(ConfigStoreError::InvalidRange { min, max });
            }
            let threshold =
                state
                    .thresholds
                    .get_mut(name)
                    .ok_or_else(|| ConfigStoreError::NotFound {
                        name: name.to_string(),
                    })?;

            if !threshold.accepts(value) {
                return Err(ConfigStoreError::OutOfBounds {
                    name: name.to_string(),
                    value,
                    min: threshold.min_value,
                    max: threshold.max_value,
                });
            }
            if threshold.current_value == value {
                return Ok(UpdateOutcome::Unchanged);
            }

            let now = Utc::now();
            let old = threshold.current_value;
            threshold.current_value = value;
            threshold.updated_at = now;
            let (min, max) = (threshold.min_value, threshold.max_value);
            let affected = threshold.affects_rules.clone();

            for rule_name in &affected {
                if let Some(rule) = state.rules.get_mut(rule_name) {
                    rule.threshold_value = value;
                    rule.threshold_min = min;
                    rule.threshold_max = max;
                    rule.updated_at = now;
                }
            }

            let event = ConfigChangeEvent::new(
                ChangeKind::Threshold,
                name,
                "current_value",
                json!(old),
                json!(value),
                changed_by,
                reason,
            );
            state.record(event.clone());
            event
        };

        info!(threshold = name, value, changed_by, "Threshold updated");
        self.commit(&event);
        Ok(UpdateOutcome::Applied)
    }

    /// Sets a rule weight within `[0, 5]`.
    pub fn update_rule_weight(
        &self,
        name: &str,
        weight: f64,
        changed_by: &str,
        reason: Option<&str>,
    ) -> ConfigStoreResult<UpdateOutcome> {
        let _writer = self.writer.lock();
        ensure_finite(name, weight)?;
        if !(MIN_RULE_WEIGHT..=MAX_RULE_WEIGHT).contains(&weight) {
            return Err(ConfigStoreError::OutOfBounds {
                name: name.to_string(),
                value: weight,
                min: MIN_RULE_WEIGHT,
                max: MAX_RULE_WEIGHT,
            });
        }

        let event = {
            let mut state = self.state.write();
            let rule = state
                .rules
                .get_mut(name)
                .ok_or_else(|| ConfigStoreError::NotFound {
                    name: name.to_string(),
                })?;

            if rule.weight == weight {
                return Ok(UpdateOutcome::Unchanged);
            }

            let old = rule.weight;
            rule.weight = weight;
            rule.updated_at = Utc::now();

            let event = ConfigChangeEvent::new(
                ChangeKind::RuleWeight,
                name,
                "weight",
                json!(old),
                json!(weight),
                changed_by,
                reason,
            );
            state.record(event.clone());
            event
        };

        info!(rule = name, weight, changed_by, "Rule weight updated");
        self.commit(&event);
        Ok(UpdateOutcome::Applied)
    }

    pub fn set_rule_enabled(
        &self,
        name: &str,
        enabled: bool,
        changed_by: &str,
        reason: Option<&str>,
    ) -> ConfigStoreResult<UpdateOutcome> {
        let _writer = self.writer.lock();

        let event = {
            let mut state = self.state.write();
            let rule = state
                .rules
                .get_mut(name)
                .ok_or_else(|| ConfigStoreError::NotFound {
                    name: name.to_string(),
                })?;

            if rule.enabled == enabled {
                return Ok(UpdateOutcome::Unchanged);
            }

            rule.enabled = enabled;
            rule.updated_at = Utc::now();

            let event = ConfigChangeEvent::new(
                ChangeKind::RuleEnabled,
                name,
                "enabled",
                json!(!enabled),
                json!(enabled),
                changed_by,
                reason,
            );
            state.record(event.clone());
            event
        };

        info!(rule = name, enabled, changed_by, "Rule toggled");
        self.commit(&event);
        Ok(UpdateOutcome::Applied)
    }

    pub fn set_invocation_mode(
        &self,
        mode: InvocationModeKind,
        changed_by: &str,
        reason: Option<&str>,
    ) -> ConfigStoreResult<UpdateOutcome> {
        let _writer = self.writer.lock();

        let event = {
            let mut state = self.state.write();
            if state.invocation_mode == mode {
                return Ok(UpdateOutcome::Unchanged);
            }

            let old = state.invocation_mode;
            state.invocation_mode = mode;

            let event = ConfigChangeEvent::new(
                ChangeKind::InvocationMode,
                "invocation_mode",
                "mode",
                json!(old.as_str()),
                json!(mode.as_str()),
                changed_by,
                reason,
            );
            state.record(event.clone());
            event
        };

        info!(mode = %mode, changed_by, "Invocation mode updated");
        self.commit(&event);
        Ok(UpdateOutcome::Applied)
    }

    /// Applies each update in order under one writer lock.
    ///
    /// Every entry is validated independently against the state left by the
    /// entries before it; one rejection does not undo the others. Results are
    /// keyed by item name. Range bounds are checked per entry, so widening the
    /// band upwards needs the maximum listed before the minimum.
    pub fn bulk_update(
        &self,
        updates: Vec<ConfigUpdate>,
        changed_by: &str,
        reason: Option<&str>,
    ) -> BTreeMap<String, ConfigStoreResult<UpdateOutcome>> {
        let _writer = self.writer.lock();

        let results: BTreeMap<_, _> = updates
            .into_iter()
            .map(|update| {
                let name = update.name().to_string();
                let outcome = match update {
                    ConfigUpdate::Threshold { name, value } => {
                        self.update_threshold(&name, value, changed_by, reason)
                    }
                    ConfigUpdate::RuleWeight { name, weight } => {
                        self.update_rule_weight(&name, weight, changed_by, reason)
                    }
                    ConfigUpdate::RuleEnabled { name, enabled } => {
                        self.set_rule_enabled(&name, enabled, changed_by, reason)
                    }
                };
                (name, outcome)
            })
            .collect();

        debug!(
            updates = results.len(),
            rejected = results.values().filter(|r| r.is_err()).count(),
            "Bulk update finished"
        );
        results
    }

    /// Restores a threshold's default value, or a rule's default weight.
    pub fn reset_to_default(&self, name: &str, changed_by: &str) -> ConfigStoreResult<UpdateOutcome> {
        let _writer = self.writer.lock();
        let reason = Some("reset to default");

        let threshold_default = self
            .state
            .read()
            .thresholds
            .get(name)
            .map(|t| t.default_value);
        if let Some(default) = threshold_default {
            return self.update_threshold(name, default, changed_by, reason);
        }

        let default_weight = self
            .state
            .read()
            .rules
            .get(name)
            .map(|r| r.default_weight);
        match default_weight {
            Some(weight) => self.update_rule_weight(name, weight, changed_by, reason),
            None => Err(ConfigStoreError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Replaces all rules and thresholds with `snapshot`.
    ///
    /// The snapshot is validated in full first; on any violation nothing changes.
    pub fn import(
        &self,
        snapshot: ConfigSnapshot,
        changed_by: &str,
    ) -> ConfigStoreResult<UpdateOutcome> {
        validate_snapshot(&snapshot)?;
        let _writer = self.writer.lock();

        let event = {
            let mut state = self.state.write();
            let old = json!({
                "rules": state.rules.len(),
                "thresholds": state.thresholds.len(),
                "invocation_mode": state.invocation_mode.as_str(),
            });
            let new = json!({
                "rules": snapshot.rules.len(),
                "thresholds": snapshot.thresholds.len(),
                "invocation_mode": snapshot.invocation_mode.as_str(),
            });
            state.apply_snapshot(snapshot);

            let event = ConfigChangeEvent::new(
                ChangeKind::Import,
                "configuration",
                "snapshot",
                old,
                new,
                changed_by,
                Some("snapshot import"),
            );
            state.record(event.clone());
            event
        };

        info!(changed_by, "Configuration snapshot imported");
        self.commit(&event);
        Ok(UpdateOutcome::Applied)
    }

    // ----- subscribers -----

    /// Registers `callback` for every applied change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ConfigChangeEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().insert(id, Arc::new(callback));
        debug!(subscription = id.as_u64(), "Config subscriber registered");
        id
    }

    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.write().remove(&id).is_some();
        if removed {
            debug!(subscription = id.as_u64(), "Config subscriber removed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    // ----- durability -----

    /// Writes the current snapshot and syncs the backend.
    pub fn flush(&self) -> ConfigStoreResult<()> {
        let _writer = self.writer.lock();
        self.persistence.save_snapshot(&self.export())?;
        self.persistence.flush()?;
        Ok(())
    }

    /// Final flush, then drops every subscriber.
    pub fn close(&self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "Final configuration flush failed");
        }
        let dropped = {
            let mut subscribers = self.subscribers.write();
            let count = subscribers.len();
            subscribers.clear();
            count
        };
        info!(subscribers = dropped, "Configuration store closed");
    }

    fn commit(&self, event: &ConfigChangeEvent) {
        self.persist(event);
        self.notify(event);
    }

    fn persist(&self, event: &ConfigChangeEvent) {
        if let Err(e) = self.persistence.save_snapshot(&self.export()) {
            warn!(error = %e, item = %event.item_name, "Failed to persist configuration snapshot");
        }
        if let Err(e) = self.persistence.append_event(event) {
            warn!(error = %e, item = %event.item_name, "Failed to append configuration change");
        }
    }

    fn notify(&self, event: &ConfigChangeEvent) {
        let subscribers: Vec<(SubscriptionId, ConfigSubscriber)> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in subscribers {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    subscription = id.as_u64(),
                    kind = %event.kind,
                    error = %e,
                    "Config subscriber failed"
                ),
                Err(_) => error!(
                    subscription = id.as_u64(),
                    kind = %event.kind,
                    "Config subscriber panicked"
                ),
            }
        }
    }
}

fn ensure_finite(name: &str, value: f64) -> ConfigStoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigStoreError::NonFinite {
            name: name.to_string(),
            value,
        })
    }
}

fn invalid(reason: String) -> ConfigStoreError {
    ConfigStoreError::InvalidSnapshot { reason }
}

/// Checks a snapshot in full: unique names, every built-in threshold and rule
/// present, finite values, `min <= current <= max`, weights in `[0, 5]`, and
/// `affects_rules` naming known rules.
pub(crate) fn validate_snapshot(snapshot: &ConfigSnapshot) -> ConfigStoreResult<()> {
    let mut threshold_names = HashSet::new();
    for t in &snapshot.thresholds {
        if !threshold_names.insert(t.name.as_str()) {
            return Err(invalid(format!("duplicate threshold '{}'", t.name)));
        }
        let values = [t.current_value, t.default_value, t.min_value, t.max_value];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid(format!("threshold '{}' has a non-finite value", t.name)));
        }
        if t.min_value > t.max_value {
            return Err(invalid(format!(
                "threshold '{}' has min {} above max {}",
                t.name, t.min_value, t.max_value
            )));
        }
        if !t.accepts(t.current_value) || !t.accepts(t.default_value) {
            return Err(invalid(format!(
                "threshold '{}' value {} outside [{}, {}]",
                t.name, t.current_value, t.min_value, t.max_value
            )));
        }
    }

    let mut rule_names = HashSet::new();
    for r in &snapshot.rules {
        if !rule_names.insert(r.name.as_str()) {
            return Err(invalid(format!("duplicate rule '{}'", r.name)));
        }
        let weight_range = MIN_RULE_WEIGHT..=MAX_RULE_WEIGHT;
        if !r.weight.is_finite() || !weight_range.contains(&r.weight) {
            return Err(invalid(format!(
                "rule '{}' weight {} outside [{MIN_RULE_WEIGHT}, {MAX_RULE_WEIGHT}]",
                r.name, r.weight
            )));
        }
        if !r.default_weight.is_finite() || !weight_range.contains(&r.default_weight) {
            return Err(invalid(format!(
                "rule '{}' default weight {} outside [{MIN_RULE_WEIGHT}, {MAX_RULE_WEIGHT}]",
                r.name, r.default_weight
            )));
        }
        let bounds = [r.threshold_value, r.threshold_min, r.threshold_max];
        if bounds.iter().any(|v| !v.is_finite())
            || r.threshold_min > r.threshold_max
            || r.threshold_value < r.threshold_min
            || r.threshold_value > r.threshold_max
        {
            return Err(invalid(format!(
                "rule '{}' threshold {} outside [{}, {}]",
                r.name, r.threshold_value, r.threshold_min, r.threshold_max
            )));
        }
    }

    let range_bound = |name: &str| {
        snapshot
            .thresholds
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.current_value)
    };
    if let (Some(min), Some(max)) = (
        range_bound(THRESHOLD_INVOCATION_RANGE_MIN),
        range_bound(THRESHOLD_INVOCATION_RANGE_MAX),
    ) && min >= max
    {
        return Err(invalid(format!(
            "range mode minimum {min} must be below maximum {max}"
        )));
    }

    for t in default_thresholds() {
        if !threshold_names.contains(t.name.as_str()) {
            return Err(invalid(format!("missing threshold '{}'", t.name)));
        }
    }
    for r in default_rules() {
        if !rule_names.contains(r.name.as_str()) {
            return Err(invalid(format!("missing rule '{}'", r.name)));
        }
    }
    for t in &snapshot.thresholds {
        if let Some(unknown) = t
            .affects_rules
            .iter()
            .find(|r| !rule_names.contains(r.as_str()))
        {
            return Err(invalid(format!(
                "threshold '{}' affects unknown rule '{}'",
                t.name, unknown
            )));
        }
    }

    Ok(())
}
