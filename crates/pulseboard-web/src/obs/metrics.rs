//! In-process HTTP metrics rendered as Prometheus text.
//!
//! Each family maps a sorted label set to an atomic cell, so rendering order
//! only depends on the `DashMap` iteration, never on call-site label order.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

/// Label pairs, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LabelSet(Vec<(String, String)>);

impl LabelSet {
    fn of(labels: &[(&str, &str)]) -> Self {
        let mut pairs: Vec<(String, String)> =
            labels.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        pairs.sort();
        Self(pairs)
    }

    /// `a="1",b="2"`; values escaped per the exposition format.
    fn render(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let value = value.replace('\\', r"\\").replace('"', "\\\"").replace('\n', r"\n");
            let _ = write!(out, "{name}=\"{value}\"");
        }
        out
    }

    /// Same as [`render`](Self::render) plus one trailing label.
    fn render_with(&self, extra_name: &str, extra_value: &str) -> String {
        let base = self.render();
        if base.is_empty() {
            format!("{extra_name}=\"{extra_value}\"")
        } else {
            format!("{base},{extra_name}=\"{extra_value}\"")
        }
    }
}

/// Monotonic counter keyed by labels.
#[derive(Default)]
pub struct CounterVec {
    cells: DashMap<LabelSet, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.cells
            .entry(LabelSet::of(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current value (0 for an unseen label set).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.cells
            .get(&LabelSet::of(labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    fn write_to(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}\n# TYPE {name} counter");
        for cell in self.cells.iter() {
            let value = cell.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {value}", cell.key().render());
        }
    }
}

/// Upper bounds in seconds: 1ms .. 10s.
const LATENCY_BOUNDS: [f64; 8] = [0.001, 0.005, 0.025, 0.1, 0.25, 1.0, 2.5, 10.0];

#[derive(Default)]
struct LatencyCell {
    observations: AtomicU64,
    total_micros: AtomicU64,
    le: [AtomicU64; LATENCY_BOUNDS.len()],
}

/// Request latency histogram keyed by labels.
#[derive(Default)]
pub struct LatencyHistogram {
    cells: DashMap<LabelSet, LatencyCell>,
}

impl LatencyHistogram {
    pub fn observe(&self, labels: &[(&str, &str)], elapsed: Duration) {
        let cell = self.cells.entry(LabelSet::of(labels)).or_insert_with(LatencyCell::default);
        let secs = elapsed.as_secs_f64();
        cell.observations.fetch_add(1, Ordering::Relaxed);
        cell.total_micros
            .fetch_add(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX), Ordering::Relaxed);
        for (bound, slot) in LATENCY_BOUNDS.iter().zip(cell.le.iter()) {
            if secs <= *bound {
                slot.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for one label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.cells
            .get(&LabelSet::of(labels))
            .map_or(0, |c| c.observations.load(Ordering::Relaxed))
    }

    fn write_to(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}\n# TYPE {name} histogram");
        for cell in self.cells.iter() {
            let labels = cell.key();
            let hist = cell.value();
            for (bound, slot) in LATENCY_BOUNDS.iter().zip(hist.le.iter()) {
                let _ = writeln!(
                    out,
                    "{name}_bucket{{{}}} {}",
                    labels.render_with("le", &bound.to_string()),
                    slot.load(Ordering::Relaxed)
                );
            }
            let count = hist.observations.load(Ordering::Relaxed);
            let sum = hist.total_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            let _ = writeln!(out, "{name}_bucket{{{}}} {count}", labels.render_with("le", "+Inf"));
            let _ = writeln!(out, "{name}_sum{{{}}} {sum}", labels.render());
            let _ = writeln!(out, "{name}_count{{{}}} {count}", labels.render());
        }
    }
}

/// Everything the `/metrics` endpoint exposes besides caller-supplied gauges.
#[derive(Default)]
pub struct HttpMetrics {
    /// Tracked requests by method and status.
    pub requests: CounterVec,
    /// Tracked request latency by method.
    pub request_duration: LatencyHistogram,
    /// Relay submissions by outcome.
    pub relay_outcomes: CounterVec,
}

impl HttpMetrics {
    pub fn render(&self, gauges: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.requests.write_to(
            "pulseboard_http_requests_total",
            "Tracked HTTP requests.",
            &mut out,
        );
        self.request_duration.write_to(
            "pulseboard_http_request_duration_seconds",
            "Tracked HTTP request latency.",
            &mut out,
        );
        self.relay_outcomes.write_to(
            "pulseboard_relay_outcomes_total",
            "Relay submissions by outcome.",
            &mut out,
        );
        for (name, value) in gauges {
            let _ = writeln!(out, "# TYPE {name} gauge\n{name} {value}");
        }
        out
    }
}
