//! Pulseboard core: activity log, metrics aggregation, relay pipeline and
//! the shared error surface.
//!
//! Nothing here knows about HTTP servers or async runtimes. The web crate
//! supplies the concrete memory probe and the outbound HTTP client through the
//! `MemoryProbe` and `Upstream` traits.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths must surface as `PulseError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod activity;
pub mod error;
pub mod metrics;
pub mod relay;

/// Shared result type.
pub use error::{PulseError, Result};
