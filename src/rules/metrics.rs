//! Run-time statistics for the rules engine.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
/// Aggregate timing over every `check` call since the last reset.
pub struct EngineMetrics {
    /// Completed runs.
    pub runs: u64,
    /// Mean wall time per run, in milliseconds.
    pub avg_processing_time_ms: f64,
    pub min_processing_time_ms: f64,
    pub max_processing_time_ms: f64,
    /// Runs per second implied by the mean; `0.0` before the first run.
    pub throughput_per_second: f64,
}

#[derive(Debug, Default)]
struct Totals {
    runs: u64,
    total_ms: f64,
    min_ms: f64,
    max_ms: f64,
}

/// Thread-safe accumulator behind [`EngineMetrics`].
#[derive(Debug, Default)]
pub(crate) struct MetricsRecorder {
    totals: Mutex<Totals>,
}

impl MetricsRecorder {
    pub(crate) fn record(&self, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        let mut totals = self.totals.lock();
        if totals.runs == 0 {
            totals.min_ms = ms;
            totals.max_ms = ms;
        } else {
            totals.min_ms = totals.min_ms.min(ms);
            totals.max_ms = totals.max_ms.max(ms);
        }
        totals.runs += 1;
        totals.total_ms += ms;
    }

    pub(crate) fn snapshot(&self) -> EngineMetrics {
        let totals = self.totals.lock();
        if totals.runs == 0 {
            return EngineMetrics::default();
        }

        let avg = totals.total_ms / totals.runs as f64;
        EngineMetrics {
            runs: totals.runs,
            avg_processing_time_ms: avg,
            min_processing_time_ms: totals.min_ms,
            max_processing_time_ms: totals.max_ms,
            throughput_per_second: if avg > 0.0 { 1000.0 / avg } else { 0.0 },
        }
    }

    pub(crate) fn reset(&self) {
        *self.totals.lock() = Totals::default();
    }
}
