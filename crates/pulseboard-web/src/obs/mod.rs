//! Process observability: HTTP counters and the resident-memory probe.

pub mod metrics;
pub mod process;

pub use metrics::HttpMetrics;
pub use process::SysinfoProbe;
