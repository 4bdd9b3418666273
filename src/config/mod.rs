//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TAGSIFT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_DUPLICATE_CAPACITY, DEFAULT_JUDGE_TIMEOUT_MS};
use crate::decision::InvocationModeKind;

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TAGSIFT_*` overrides on top of defaults.
/// Rule weights and thresholds are not configured here; they live in the
/// [`ConfigStore`](crate::store::ConfigStore).
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON snapshot of the rule/threshold catalog. `None` keeps it in memory.
    pub config_path: Option<PathBuf>,

    /// JSON-lines change log. Only used together with `config_path`.
    pub history_path: Option<PathBuf>,

    /// Caller-side timeout for one semantic-judge call. Default: 30s.
    pub judge_timeout: Duration,

    /// Invocation mode override applied on startup.
    pub invocation_mode: Option<InvocationModeKind>,

    /// Max distinct fingerprints in the duplicate window. Default: `100_000`.
    pub duplicate_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            history_path: None,
            judge_timeout: Duration::from_millis(DEFAULT_JUDGE_TIMEOUT_MS),
            invocation_mode: None,
            duplicate_capacity: DEFAULT_DUPLICATE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_CONFIG_PATH: &'static str = "TAGSIFT_CONFIG_PATH";
    const ENV_HISTORY_PATH: &'static str = "TAGSIFT_HISTORY_PATH";
    const ENV_JUDGE_TIMEOUT_MS: &'static str = "TAGSIFT_JUDGE_TIMEOUT_MS";
    const ENV_INVOCATION_MODE: &'static str = "TAGSIFT_INVOCATION_MODE";
    const ENV_DUPLICATE_CAPACITY: &'static str = "TAGSIFT_DUPLICATE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config_path = Self::parse_optional_path_from_env(Self::ENV_CONFIG_PATH);
        let history_path = Self::parse_optional_path_from_env(Self::ENV_HISTORY_PATH);
        let judge_timeout = Self::parse_timeout_from_env(defaults.judge_timeout)?;
        let invocation_mode = Self::parse_mode_from_env();
        let duplicate_capacity =
            Self::parse_usize_from_env(Self::ENV_DUPLICATE_CAPACITY, defaults.duplicate_capacity);

        Ok(Self {
            config_path,
            history_path,
            judge_timeout,
            invocation_mode,
            duplicate_capacity,
        })
    }

    /// Validates paths and basic invariants (does not create files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duplicate_capacity == 0 {
            return Err(ConfigError::InvalidCapacity {
                value: self.duplicate_capacity,
            });
        }

        for path in [&self.config_path, &self.history_path].into_iter().flatten() {
            if path.exists() && !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && parent.exists()
                && !parent.is_dir()
            {
                return Err(ConfigError::NotADirectory {
                    path: parent.to_path_buf(),
                });
            }
        }

        Ok(())
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_JUDGE_TIMEOUT_MS) {
            Ok(value) => {
                let millis: u64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::TimeoutParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if millis == 0 {
                    return Err(ConfigError::InvalidTimeout { value });
                }

                Ok(Duration::from_millis(millis))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_mode_from_env() -> Option<InvocationModeKind> {
        env::var(Self::ENV_INVOCATION_MODE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| InvocationModeKind::parse(&v))
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
