//! Shared fixtures for router tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;

use pulseboard_core::metrics::MemoryProbe;
use pulseboard_core::relay::{OutboundRequest, Upstream, UpstreamError, UpstreamResponse};
use pulseboard_core::{PulseError, Result};
use pulseboard_web::app_state::AppState;
use pulseboard_web::config::PulseConfig;

pub struct FixedProbe(pub u64);

impl MemoryProbe for FixedProbe {
    fn resident_bytes(&self) -> Result<u64> {
        Ok(self.0)
    }
}

pub struct BrokenProbe;

impl MemoryProbe for BrokenProbe {
    fn resident_bytes(&self) -> Result<u64> {
        Err(PulseError::Internal("Test Error".into()))
    }
}

/// Canned upstream that counts calls.
pub struct CannedUpstream {
    outcome: std::result::Result<UpstreamResponse, UpstreamError>,
    calls: AtomicUsize,
}

impl CannedUpstream {
    pub fn ok(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(UpstreamResponse { status, body: body.to_string() }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: UpstreamError) -> Arc<Self> {
        Arc::new(Self { outcome: Err(err), calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Upstream for CannedUpstream {
    async fn send(&self, _req: OutboundRequest) -> std::result::Result<UpstreamResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub fn test_config() -> PulseConfig {
    let mut cfg = PulseConfig::default();
    cfg.server.static_dir = format!("{}/tests/fixtures/static", env!("CARGO_MANIFEST_DIR"));
    cfg
}

pub fn state_with(upstream: Arc<CannedUpstream>) -> AppState {
    AppState::builder(test_config())
        .upstream(upstream)
        .memory_probe(Arc::new(FixedProbe(64 * 1024 * 1024)))
        .build()
        .unwrap()
}

pub fn state() -> AppState {
    state_with(CannedUpstream::ok(200, "ok"))
}

pub fn get_req(uri: &str) -> Request<Body> {
    Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()
}

pub fn post_req(uri: &str) -> Request<Body> {
    Request::builder().method(Method::POST).uri(uri).body(Body::empty()).unwrap()
}

/// Percent-encode everything outside the unreserved set.
pub fn enc(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

pub fn form_req(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", enc(k), enc(v)))
        .collect::<Vec<_>>()
        .join("&");
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
