//! Durable storage seam for [`ConfigStore`](super::ConfigStore).
//!
//! The store calls the backend after every applied change. Backend errors are
//! logged by the store and never roll a change back.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{PersistenceError, PersistenceResult};
use super::types::{ConfigChangeEvent, ConfigSnapshot};

/// Durable storage for configuration snapshots and the change log.
pub trait ConfigPersistence: Send + Sync + std::fmt::Debug {
    /// Returns the last saved snapshot, if any.
    fn load_snapshot(&self) -> PersistenceResult<Option<ConfigSnapshot>>;

    /// Replaces the saved snapshot.
    fn save_snapshot(&self, snapshot: &ConfigSnapshot) -> PersistenceResult<()>;

    /// Appends one event to the change log.
    fn append_event(&self, event: &ConfigChangeEvent) -> PersistenceResult<()>;

    /// Returns the change log, oldest first.
    fn load_history(&self) -> PersistenceResult<Vec<ConfigChangeEvent>>;

    /// Forces buffered writes to durable storage.
    fn flush(&self) -> PersistenceResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Keeps nothing. The store runs purely in memory.
pub struct NoopPersistence;

impl ConfigPersistence for NoopPersistence {
    fn load_snapshot(&self) -> PersistenceResult<Option<ConfigSnapshot>> {
        Ok(None)
    }

    fn save_snapshot(&self, _snapshot: &ConfigSnapshot) -> PersistenceResult<()> {
        Ok(())
    }

    fn append_event(&self, _event: &ConfigChangeEvent) -> PersistenceResult<()> {
        Ok(())
    }

    fn load_history(&self) -> PersistenceResult<Vec<ConfigChangeEvent>> {
        Ok(Vec::new())
    }
}

const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone)]
/// Pretty-printed JSON snapshot plus an optional JSON-lines change log.
///
/// Snapshots are written to a temporary sibling file and renamed into place, so
/// a crash leaves either the old or the new snapshot on disk.
pub struct JsonFilePersistence {
    snapshot_path: PathBuf,
    history_path: Option<PathBuf>,
}

impl JsonFilePersistence {
    pub fn new(snapshot_path: impl Into<PathBuf>, history_path: Option<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            history_path,
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn history_path(&self) -> Option<&Path> {
        self.history_path.as_deref()
    }

    fn temp_snapshot_path(&self) -> PathBuf {
        let mut name = self
            .snapshot_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.snapshot_path.with_file_name(name)
    }

    fn ensure_parent(path: &Path) -> PersistenceResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ConfigPersistence for JsonFilePersistence {
    fn load_snapshot(&self) -> PersistenceResult<Option<ConfigSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.snapshot_path)?;
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %self.snapshot_path.display(), "Loaded configuration snapshot");
        Ok(Some(snapshot))
    }

    fn save_snapshot(&self, snapshot: &ConfigSnapshot) -> PersistenceResult<()> {
        Self::ensure_parent(&self.snapshot_path)?;

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let temp_path = self.temp_snapshot_path();

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.snapshot_path)?;
        Ok(())
    }

    fn append_event(&self, event: &ConfigChangeEvent) -> PersistenceResult<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        Self::ensure_parent(path)?;

        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn load_history(&self) -> PersistenceResult<Vec<ConfigChangeEvent>> {
        let Some(path) = &self.history_path else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event =
                serde_json::from_str(&line).map_err(|e| PersistenceError::CorruptLog {
                    path: path.clone(),
                    line: index + 1,
                    message: e.to_string(),
                })?;
            events.push(event);
        }
        Ok(events)
    }

    fn flush(&self) -> PersistenceResult<()> {
        if let Some(path) = &self.history_path
            && path.exists()
        {
            OpenOptions::new().append(true).open(path)?.sync_all()?;
        }
        Ok(())
    }
}
