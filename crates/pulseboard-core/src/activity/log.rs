//! Append-only activity log shared by every request handler.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;

/// One tracked request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    /// Request path as seen by the router.
    pub page: String,
    /// Seconds since the Unix epoch at response completion.
    pub timestamp: f64,
    /// Final HTTP status of the response.
    pub response_code: u16,
    /// Latency in milliseconds, two decimals (e.g. `"12.34"`).
    pub response_time_ms: String,
}

impl ActivityRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn completed(page: impl Into<String>, response_code: u16, elapsed_ms: f64) -> Self {
        Self::at(page, now_epoch_secs(), response_code, elapsed_ms)
    }

    /// Build a record with an explicit timestamp.
    pub fn at(page: impl Into<String>, timestamp: f64, response_code: u16, elapsed_ms: f64) -> Self {
        Self {
            page: page.into(),
            timestamp,
            response_code,
            response_time_ms: format!("{:.2}", elapsed_ms.max(0.0)),
        }
    }

    /// Parsed latency, `None` if the text is not a number.
    pub fn latency_ms(&self) -> Option<f64> {
        self.response_time_ms.trim().parse().ok()
    }

    pub fn is_cache_hit(&self) -> bool {
        self.response_code == 304
    }
}

/// Current wall-clock time as fractional epoch seconds.
pub fn now_epoch_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Ordered, unbounded request log (oldest first).
///
/// Every operation takes the lock for the duration of a push, a swap or a
/// clone, so concurrent handlers never observe a half-written record.
#[derive(Debug, Default)]
pub struct ActivityLog {
    records: Mutex<Vec<ActivityRecord>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<ActivityRecord>> {
        // push/take/clone never leave the Vec inconsistent, so poisoning is ignored.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a record to the end of the log.
    pub fn append(&self, record: ActivityRecord) {
        self.guard().push(record);
    }

    /// Drop every record.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.guard());
        tracing::debug!(dropped = dropped.len(), "activity log cleared");
    }

    /// Copy of the records at call time.
    pub fn snapshot(&self) -> Vec<ActivityRecord> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}
