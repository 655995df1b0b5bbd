//! Point-in-time operational metrics derived from the activity log.

use std::time::Duration;

use serde::Serialize;

use crate::activity::ActivityRecord;
use crate::error::Result;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Source of the process resident set size.
pub trait MemoryProbe: Send + Sync {
    /// Resident memory in bytes.
    fn resident_bytes(&self) -> Result<u64>;
}

/// Latency aggregate over a slice of records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatencySummary {
    pub count: usize,
    pub avg_response_ms: f64,
    pub cache_hits: usize,
}

impl LatencySummary {
    /// Average is exactly 0 for an empty slice. Unparseable latencies count
    /// as zero but still count as a request.
    pub fn of(records: &[ActivityRecord]) -> Self {
        let count = records.len();
        let total: f64 = records.iter().filter_map(ActivityRecord::latency_ms).sum();
        let avg_response_ms = if count > 0 { total / count as f64 } else { 0.0 };
        let cache_hits = records.iter().filter(|r| r.is_cache_hit()).count();
        Self { count, avg_response_ms, cache_hits }
    }
}

/// Inputs that live outside the activity log.
#[derive(Debug, Clone, Copy)]
pub struct ProcessInputs {
    pub uptime: Duration,
    pub active_sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub memory_mb: f64,
    pub uptime_secs: f64,
    pub active_sessions: usize,
    pub avg_response_ms: f64,
    pub cache_hits: usize,
}

impl MetricsSnapshot {
    /// Collect a snapshot. A probe failure is returned, not masked.
    pub fn collect(
        records: &[ActivityRecord],
        probe: &dyn MemoryProbe,
        inputs: ProcessInputs,
    ) -> Result<Self> {
        let rss = probe.resident_bytes()?;
        let latency = LatencySummary::of(records);
        Ok(Self {
            memory_mb: rss as f64 / BYTES_PER_MB,
            uptime_secs: inputs.uptime.as_secs_f64(),
            active_sessions: inputs.active_sessions,
            avg_response_ms: latency.avg_response_ms,
            cache_hits: latency.cache_hits,
        })
    }

    /// Labelled values in display order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("App Memory Usage", format!("{:.2} MB", self.memory_mb)),
            ("Running Time", format!("{:.2} seconds", self.uptime_secs)),
            ("Active Sessions", self.active_sessions.to_string()),
            ("Avg Response Time", format!("{:.2} ms", self.avg_response_ms)),
            ("Cache Hits", self.cache_hits.to_string()),
        ]
    }
}
