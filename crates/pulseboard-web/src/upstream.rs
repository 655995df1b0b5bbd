//! reqwest-backed [`Upstream`] used by the relay endpoint.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use pulseboard_core::relay::{
    OutboundRequest, RelayMethod, Upstream, UpstreamError, UpstreamResponse, POST_PLACEHOLDER,
};
use pulseboard_core::{PulseError, Result};

use crate::config::RelaySection;

pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(cfg: &RelaySection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| PulseError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { client })
    }
}

/// Flatten the error source chain. Timeouts always mention "timeout".
fn describe(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    if e.is_timeout() && !msg.to_ascii_lowercase().contains("timeout") {
        msg.push_str(" (timeout)");
    }
    msg
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, req: OutboundRequest) -> std::result::Result<UpstreamResponse, UpstreamError> {
        let builder = match req.method {
            RelayMethod::Get => self.client.get(&req.url),
            RelayMethod::Post => self.client.post(&req.url).form(&POST_PLACEHOLDER),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(describe(&e)))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(describe(&e)))?;

        Ok(UpstreamResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
