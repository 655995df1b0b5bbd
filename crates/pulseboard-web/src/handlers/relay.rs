//! `/request-analysis`: relay form and submission.

use std::net::SocketAddr;

use axum::{
    extract::{rejection::FormRejection, ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::Result;
use crate::pages::{self, RequestAnalysisPage};

#[derive(Debug, Deserialize)]
pub struct RelayForm {
    #[serde(default)]
    pub request_input: String,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".into()
}

impl Default for RelayForm {
    fn default() -> Self {
        Self { request_input: String::new(), method: default_method() }
    }
}

/// First `X-Forwarded-For` hop, else the peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|p| p.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn form() -> Result<Html<String>> {
    pages::render(&RequestAnalysisPage)
}

pub async fn submit(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    form: std::result::Result<Form<RelayForm>, FormRejection>,
) -> Response {
    // A body that is not a urlencoded form carries no input.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("relay body is not a form: {rejection}");
            RelayForm::default()
        }
    };
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let outcomes = &state.metrics().relay_outcomes;

    match state.relay().execute(&form.request_input, &form.method, &ip).await {
        Ok(result) => {
            outcomes.inc(&[("outcome", "relayed")]);
            let status = StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(result)).into_response()
        }
        Err(failure) => {
            outcomes.inc(&[("outcome", failure.error.client_code().as_str())]);
            let status = StatusCode::from_u16(failure.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(failure.to_json())).into_response()
        }
    }
}
