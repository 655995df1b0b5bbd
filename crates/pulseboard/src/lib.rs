//! Top-level facade crate for Pulseboard.
//!
//! Re-exports the core pipeline types and the web library so users can depend on a single crate.

pub mod core {
    pub use pulseboard_core::*;
}

pub mod web {
    pub use pulseboard_web::*;
}
