//! Metrics aggregation over the activity log.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use pulseboard_core::activity::ActivityRecord;
use pulseboard_core::metrics::{LatencySummary, MemoryProbe, MetricsSnapshot, ProcessInputs};
use pulseboard_core::{PulseError, Result};

struct FixedProbe(u64);

impl MemoryProbe for FixedProbe {
    fn resident_bytes(&self) -> Result<u64> {
        Ok(self.0)
    }
}

struct BrokenProbe;

impl MemoryProbe for BrokenProbe {
    fn resident_bytes(&self) -> Result<u64> {
        Err(PulseError::Internal("Test Error".into()))
    }
}

fn rec(code: u16, ms: f64) -> ActivityRecord {
    ActivityRecord::at("/", 0.0, code, ms)
}

fn inputs() -> ProcessInputs {
    ProcessInputs { uptime: Duration::from_millis(1500), active_sessions: 3 }
}

#[test]
fn empty_log_averages_to_zero() {
    let s = LatencySummary::of(&[]);
    assert_eq!(s.count, 0);
    assert_eq!(s.avg_response_ms, 0.0);
    assert_eq!(s.cache_hits, 0);
}

#[test]
fn cache_hits_count_304s() {
    let records = [rec(200, 1.0), rec(304, 1.0), rec(304, 1.0), rec(500, 1.0)];
    assert_eq!(LatencySummary::of(&records).cache_hits, 2);
}

#[test]
fn average_uses_record_count() {
    let records = [rec(200, 10.0), rec(200, 20.0), rec(404, 30.0)];
    let s = LatencySummary::of(&records);
    assert!((s.avg_response_ms - 20.0).abs() < 1e-9);
}

#[test]
fn unparseable_latency_counts_as_zero() {
    let mut odd = rec(200, 0.0);
    odd.response_time_ms = "n/a".into();
    let records = [rec(200, 10.0), odd];
    let s = LatencySummary::of(&records);
    assert!((s.avg_response_ms - 5.0).abs() < 1e-9);
}

#[test]
fn snapshot_collects_all_fields() {
    let records = [rec(200, 2.0), rec(304, 4.0)];
    let snap = MetricsSnapshot::collect(&records, &FixedProbe(3 * 1024 * 1024), inputs()).unwrap();
    assert!((snap.memory_mb - 3.0).abs() < 1e-9);
    assert!((snap.uptime_secs - 1.5).abs() < 1e-9);
    assert_eq!(snap.active_sessions, 3);
    assert!((snap.avg_response_ms - 3.0).abs() < 1e-9);
    assert_eq!(snap.cache_hits, 1);

    let rows = snap.display_rows();
    let labels: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        labels,
        ["App Memory Usage", "Running Time", "Active Sessions", "Avg Response Time", "Cache Hits"]
    );
    assert_eq!(rows[0].1, "3.00 MB");
    assert_eq!(rows[1].1, "1.50 seconds");
    assert_eq!(rows[2].1, "3");
    assert_eq!(rows[3].1, "3.00 ms");
    assert_eq!(rows[4].1, "1");
}

#[test]
fn probe_failure_propagates() {
    let err = MetricsSnapshot::collect(&[], &BrokenProbe, inputs()).expect_err("must fail");
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("Test Error"));
}
