//! Pulseboard web library entry.
//!
//! This crate wires the session layer, the activity interceptor, the route
//! handlers and the relay's HTTP client into one axum application. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod interceptor;
pub mod obs;
pub mod pages;
pub mod router;
pub mod session;
pub mod upstream;
