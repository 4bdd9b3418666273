//! Sliding-window store of recently seen content fingerprints.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::constants::DEFAULT_DUPLICATE_CAPACITY;

/// What the tracker saw for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateObservation {
    /// Occurrences of the same fingerprint inside the window, excluding this one.
    pub prior: usize,
    /// Whether this submission was recorded.
    pub recorded: bool,
}

/// Fingerprint -> submission timestamps, bounded by a distinct-fingerprint capacity.
///
/// When full, expired timestamps are purged first; if that frees nothing, the
/// fingerprint seen least recently is evicted.
pub struct DuplicateTracker {
    entries: Mutex<HashMap<u64, VecDeque<DateTime<Utc>>>>,
    capacity: usize,
}

impl fmt::Debug for DuplicateTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateTracker")
            .field("fingerprints", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for DuplicateTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_CAPACITY)
    }
}

impl DuplicateTracker {
    /// Creates a tracker holding at most `capacity` distinct fingerprints (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of distinct fingerprints currently tracked.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Forgets every fingerprint.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Counts earlier occurrences of `fingerprint` newer than `now - window`.
    ///
    /// The submission is recorded only when the prior count is below
    /// `max_occurrences`, so a rejected duplicate does not extend its own window.
    pub fn observe(
        &self,
        fingerprint: u64,
        now: DateTime<Utc>,
        window: TimeDelta,
        max_occurrences: usize,
    ) -> DuplicateObservation {
        let cutoff = now - window;
        let mut entries = self.entries.lock();

        let prior = match entries.get_mut(&fingerprint) {
            Some(seen) => {
                seen.retain(|ts| *ts > cutoff);
                seen.len()
            }
            None => 0,
        };

        if prior >= max_occurrences {
            return DuplicateObservation {
                prior,
                recorded: false,
            };
        }

        if !entries.contains_key(&fingerprint) && entries.len() >= self.capacity {
            Self::make_room(&mut entries, cutoff);
        }
        entries.entry(fingerprint).or_default().push_back(now);

        DuplicateObservation {
            prior,
            recorded: true,
        }
    }

    fn make_room(entries: &mut HashMap<u64, VecDeque<DateTime<Utc>>>, cutoff: DateTime<Utc>) {
        let before = entries.len();
        entries.retain(|_, seen| {
            seen.retain(|ts| *ts > cutoff);
            !seen.is_empty()
        });

        if entries.len() == before {
            let stalest = entries
                .iter()
                .min_by_key(|(_, seen)| seen.back().copied())
                .map(|(fp, _)| *fp);
            if let Some(fp) = stalest {
                entries.remove(&fp);
            }
        }

        debug!(
            before,
            after = entries.len(),
            "Duplicate window at capacity; evicted fingerprints"
        );
    }
}
