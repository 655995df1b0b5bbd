//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let gauges = [
        ("pulseboard_activity_records", state.activity().len() as u64),
        ("pulseboard_sessions_active", state.sessions().active_sessions() as u64),
        ("pulseboard_uptime_seconds", state.uptime().as_secs()),
    ];
    let body = state.metrics().render(&gauges);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
