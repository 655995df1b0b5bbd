//! Request relay ("request analysis").
//!
//! Sanitize -> validate -> method check -> single outbound call -> normalize.
//! No retries, no caching.

pub mod sanitize;
pub mod types;

use std::sync::Arc;

pub use sanitize::sanitize;
pub use types::{
    now_stamp, OutboundRequest, RelayEcho, RelayFailure, RelayMethod, RelayResult, Upstream,
    UpstreamError, UpstreamResponse, POST_PLACEHOLDER,
};

use crate::error::PulseError;

pub const DEFAULT_EXCERPT_CHARS: usize = 500;

const EMPTY_INPUT: &str = "No request input provided";
const NOT_A_URL: &str = "Please provide a valid URL starting with http:// or https://";

pub struct RelayService {
    upstream: Arc<dyn Upstream>,
    excerpt_chars: usize,
}

impl RelayService {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream, excerpt_chars: DEFAULT_EXCERPT_CHARS }
    }

    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars.max(1);
        self
    }

    /// Run one relay request on behalf of `client_ip`.
    pub async fn execute(
        &self,
        raw_input: &str,
        method: &str,
        client_ip: &str,
    ) -> Result<RelayResult, RelayFailure> {
        let input = sanitize(raw_input.trim());
        let method = method.trim().to_uppercase();
        let echo = RelayEcho {
            method: method.clone(),
            ip: client_ip.to_string(),
            request_data: input.clone(),
        };

        if input.is_empty() {
            return Err(RelayFailure::bare(PulseError::InvalidInput(EMPTY_INPUT.into())));
        }
        if !(input.starts_with("http://") || input.starts_with("https://")) {
            return Err(RelayFailure::echoed(PulseError::InvalidInput(NOT_A_URL.into()), echo));
        }
        let method = RelayMethod::parse(&method).map_err(RelayFailure::bare)?;

        let req = OutboundRequest { method, url: input };
        match self.upstream.send(req).await {
            Ok(resp) => {
                tracing::debug!(%method, status = resp.status, "relay completed");
                Ok(RelayResult {
                    echo,
                    status_code: resp.status,
                    response: resp.body.chars().take(self.excerpt_chars).collect(),
                    timestamp: now_stamp(),
                })
            }
            Err(UpstreamError::Transport(msg)) => {
                let error = PulseError::from_transport(msg);
                tracing::warn!(%method, code = error.client_code().as_str(), "relay transport failure: {error}");
                Err(RelayFailure::echoed(error, echo))
            }
            Err(UpstreamError::Other(msg)) => {
                tracing::error!(%method, "relay failed unexpectedly: {msg}");
                Err(RelayFailure::echoed(PulseError::Internal(msg), echo))
            }
        }
    }
}
