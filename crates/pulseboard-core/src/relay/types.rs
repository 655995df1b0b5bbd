//! Relay request/response types and the upstream seam.

use std::fmt;

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{PulseError, Result};

/// Form body sent with relayed POST requests.
pub const POST_PLACEHOLDER: [(&str, &str); 1] = [("test", "data")];

/// Methods the relay is willing to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMethod {
    Get,
    Post,
}

impl RelayMethod {
    /// Parse an already upper-cased method name.
    pub fn parse(method: &str) -> Result<Self> {
        match method {
            "GET" => Ok(RelayMethod::Get),
            "POST" => Ok(RelayMethod::Post),
            other => Err(PulseError::UnsupportedMethod(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelayMethod::Get => "GET",
            RelayMethod::Post => "POST",
        }
    }
}

impl fmt::Display for RelayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: RelayMethod,
    pub url: String,
}

/// What came back from the upstream.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Failure while talking to the upstream.
#[derive(Debug, Clone)]
pub enum UpstreamError {
    /// Network-level failure (connect, DNS, timeout, reset, ...).
    Transport(String),
    /// Anything else.
    Other(String),
}

/// Outbound HTTP seam. The web crate plugs in a reqwest client.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, req: OutboundRequest) -> std::result::Result<UpstreamResponse, UpstreamError>;
}

/// Caller context echoed back on success and on most failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayEcho {
    pub method: String,
    pub ip: String,
    pub request_data: String,
}

/// Normalized successful relay.
#[derive(Debug, Clone, Serialize)]
pub struct RelayResult {
    #[serde(flatten)]
    pub echo: RelayEcho,
    pub status_code: u16,
    pub response: String,
    pub timestamp: String,
}

/// Normalized relay failure.
///
/// `echo` is `None` for the empty-input and unsupported-method cases, which
/// answer with a bare `{"error": ...}` body.
#[derive(Debug)]
pub struct RelayFailure {
    pub error: PulseError,
    pub echo: Option<RelayEcho>,
    pub timestamp: String,
}

impl RelayFailure {
    pub fn bare(error: PulseError) -> Self {
        Self { error, echo: None, timestamp: now_stamp() }
    }

    pub fn echoed(error: PulseError, echo: RelayEcho) -> Self {
        Self { error, echo: Some(echo), timestamp: now_stamp() }
    }

    pub fn status_code(&self) -> u16 {
        self.error.status_code()
    }

    /// Message shown to the caller; unexpected faults are prefixed.
    pub fn message(&self) -> String {
        match &self.error {
            PulseError::Internal(m) => format!("Unexpected error: {m}"),
            other => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        match &self.echo {
            None => json!({ "error": self.message() }),
            Some(echo) => json!({
                "error": self.message(),
                "method": echo.method,
                "ip": echo.ip,
                "request_data": echo.request_data,
                "status_code": self.status_code(),
                "timestamp": self.timestamp,
            }),
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS`, local time.
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
