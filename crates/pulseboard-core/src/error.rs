//! Shared error type across Pulseboard crates.

use thiserror::Error;

/// Client-facing error kinds (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Empty or malformed relay input.
    InvalidInput,
    /// Relay method outside GET/POST.
    UnsupportedMethod,
    /// Upstream did not answer in time.
    UpstreamTimeout,
    /// Any other upstream transport failure.
    UpstreamTransport,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidInput => "INVALID_INPUT",
            ClientCode::UnsupportedMethod => "UNSUPPORTED_METHOD",
            ClientCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ClientCode::UpstreamTransport => "UPSTREAM_TRANSPORT",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status reported to the caller.
    pub fn status_code(self) -> u16 {
        match self {
            ClientCode::InvalidInput
            | ClientCode::UnsupportedMethod
            | ClientCode::UpstreamTransport => 400,
            ClientCode::UpstreamTimeout => 502,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulseError>;

/// Unified error type used by core and web.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("Request failed: {0}")]
    UpstreamTimeout(String),
    #[error("Request failed: {0}")]
    UpstreamTransport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PulseError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PulseError::InvalidInput(_) => ClientCode::InvalidInput,
            PulseError::UnsupportedMethod(_) => ClientCode::UnsupportedMethod,
            PulseError::UpstreamTimeout(_) => ClientCode::UpstreamTimeout,
            PulseError::UpstreamTransport(_) => ClientCode::UpstreamTransport,
            PulseError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.client_code().status_code()
    }

    /// Classify a transport failure by its message.
    ///
    /// Any message mentioning "timeout" (case-insensitive) is an upstream
    /// timeout; everything else is a plain transport error.
    pub fn from_transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_ascii_lowercase().contains("timeout") {
            PulseError::UpstreamTimeout(message)
        } else {
            PulseError::UpstreamTransport(message)
        }
    }
}
