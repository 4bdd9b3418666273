//! Dynamic configuration: rule weights, thresholds and the invocation mode.
//!
//! [`ConfigStore`] validates every change, keeps an append-only change log,
//! persists through a [`ConfigPersistence`] backend and notifies subscribers.
//!
//! # Change Pipeline
//!
//! ```text
//! validate -> apply -> record -> persist -> notify
//! ```
//!
//! A rejected change leaves no trace. A change that matches the current value
//! returns [`UpdateOutcome::Unchanged`] and skips the last three steps.
//! Persistence failures are logged and do not undo the change.

pub mod config_store;
pub mod defaults;
pub mod error;
pub mod persistence;
pub mod types;


pub use config_store::{ConfigStore, ConfigSubscriber, MAX_HISTORY_EVENTS};
pub use defaults::{default_rules, default_threshold_value, default_thresholds};
pub use error::{ConfigStoreError, ConfigStoreResult, PersistenceError, PersistenceResult};
pub use persistence::{ConfigPersistence, JsonFilePersistence, NoopPersistence};
pub use types::{
    ChangeKind, ConfigChangeEvent, ConfigSnapshot, ConfigUpdate, RuleDefinition, SubscriptionId,
    ThresholdCategory, ThresholdDefinition, UpdateOutcome,
};
