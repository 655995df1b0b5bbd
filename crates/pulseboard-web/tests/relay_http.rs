//! Relay endpoint: router + canned upstream, and the reqwest upstream against
//! an `httpmock` server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use httpmock::prelude::*;
use tower::ServiceExt; // .oneshot()

use pulseboard_core::relay::{OutboundRequest, RelayMethod, Upstream, UpstreamError};
use pulseboard_web::app_state::AppState;
use pulseboard_web::config::RelaySection;
use pulseboard_web::router::build_router;
use pulseboard_web::upstream::HttpUpstream;

use common::*;

fn relay_form(input: &str, method: &str) -> axum::http::Request<axum::body::Body> {
    form_req("/request-analysis", &[("request_input", input), ("method", method)])
}

// Endpoint behaviour (canned upstream)

#[tokio::test]
async fn form_page_renders() {
    let app = build_router(state());
    let resp = app.oneshot(get_req("/request-analysis")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("name=\"request_input\""));
}

#[tokio::test]
async fn empty_input_is_400() {
    let up = CannedUpstream::ok(200, "");
    let state = state_with(up.clone());
    let app = build_router(state.clone());
    let resp = app.oneshot(relay_form("", "GET")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No request input provided");
    assert_eq!(up.calls(), 0);
    assert_eq!(state.metrics().relay_outcomes.get(&[("outcome", "INVALID_INPUT")]), 1);
}

#[tokio::test]
async fn json_body_is_treated_as_empty_input() {
    let up = CannedUpstream::ok(200, "");
    let app = build_router(state_with(up.clone()));
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/request-analysis")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"request_input":"https://example.com"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, serde_json::json!({ "error": "No request input provided" }));
    assert_eq!(up.calls(), 0);
}

#[tokio::test]
async fn bare_post_is_treated_as_empty_input() {
    let state = state();
    let app = build_router(state.clone());
    let resp = app.oneshot(post_req("/request-analysis")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No request input provided");
    assert_eq!(state.activity().snapshot()[0].response_code, 400);
}

#[tokio::test]
async fn script_payload_sanitizes_to_empty() {
    let up = CannedUpstream::ok(200, "");
    let app = build_router(state_with(up.clone()));
    let resp = app
        .oneshot(relay_form("<script>alert(1)</script>", "GET"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No request input provided");
    assert_eq!(up.calls(), 0);
}

#[tokio::test]
async fn non_url_echoes_request_context() {
    let app = build_router(state());
    let mut req = relay_form("ftp://example.com", "post");
    req.headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Please provide a valid URL starting with http:// or https://");
    assert_eq!(body["method"], "POST");
    assert_eq!(body["ip"], "203.0.113.7");
    assert_eq!(body["request_data"], "ftp://example.com");
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn unsupported_method_is_400_without_outbound_call() {
    let up = CannedUpstream::ok(200, "");
    let app = build_router(state_with(up.clone()));
    let resp = app.oneshot(relay_form("https://example.com", "PUT")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Unsupported method: PUT");
    assert_eq!(up.calls(), 0);
}

#[tokio::test]
async fn method_defaults_to_get() {
    let up = CannedUpstream::ok(200, "fine");
    let app = build_router(state_with(up.clone()));
    let resp = app
        .oneshot(form_req("/request-analysis", &[("request_input", "https://example.com")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["method"], "GET");
    assert_eq!(up.calls(), 1);
}

#[tokio::test]
async fn success_mirrors_upstream_status() {
    let up = CannedUpstream::ok(200, "Mocked GET response");
    let app = build_router(state_with(up));
    let resp = app.oneshot(relay_form("https://example.com", "GET")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["method"], "GET");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["ip"], "unknown");
    assert!(body["response"].as_str().unwrap().contains("Mocked GET response"));
}

#[tokio::test]
async fn timeout_failure_is_502() {
    let up = CannedUpstream::failing(UpstreamError::Transport("request timeout".into()));
    let app = build_router(state_with(up));
    let resp = app.oneshot(relay_form("https://slow.example", "GET")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(resp).await;
    assert_eq!(body["status_code"], 502);
    assert!(body["error"].as_str().unwrap().starts_with("Request failed:"));
}

#[tokio::test]
async fn unexpected_failure_is_500_with_message() {
    let up = CannedUpstream::failing(UpstreamError::Other("decoder exploded".into()));
    let app = build_router(state_with(up));
    let resp = app.oneshot(relay_form("https://x.example", "GET")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "Unexpected error: decoder exploded");
}

// reqwest upstream against a mock server

fn relay_cfg(timeout_ms: u64) -> RelaySection {
    RelaySection { timeout_ms, ..RelaySection::default() }
}

#[tokio::test]
async fn http_upstream_get() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/page").header("user-agent", "Pulseboard/1.0");
            then.status(200).body("Mocked GET response");
        })
        .await;

    let up = HttpUpstream::new(&relay_cfg(5000)).unwrap();
    let resp = up
        .send(OutboundRequest { method: RelayMethod::Get, url: server.url("/page") })
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Mocked GET response");
    mock.assert_async().await;
}

#[tokio::test]
async fn http_upstream_post_sends_placeholder_form() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/submit")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("test=data");
            then.status(201).body("Mocked POST response");
        })
        .await;

    let up = HttpUpstream::new(&relay_cfg(5000)).unwrap();
    let resp = up
        .send(OutboundRequest { method: RelayMethod::Post, url: server.url("/submit") })
        .await
        .unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, "Mocked POST response");
    mock.assert_async().await;
}

#[tokio::test]
async fn http_upstream_timeout_mentions_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(2)).body("late");
        })
        .await;

    let up = HttpUpstream::new(&relay_cfg(200)).unwrap();
    let err = up
        .send(OutboundRequest { method: RelayMethod::Get, url: server.url("/slow") })
        .await
        .unwrap_err();
    match err {
        UpstreamError::Transport(msg) => assert!(msg.to_lowercase().contains("timeout"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn http_upstream_connection_refused_is_transport() {
    // Bind then drop to get a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let up = HttpUpstream::new(&relay_cfg(2000)).unwrap();
    let err = up
        .send(OutboundRequest { method: RelayMethod::Get, url: format!("http://127.0.0.1:{port}/") })
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)));
}

#[tokio::test]
async fn end_to_end_post_relay() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(201).body("Mocked POST response");
        })
        .await;

    let state = AppState::builder(test_config())
        .memory_probe(Arc::new(FixedProbe(1)))
        .build()
        .unwrap();
    let app = build_router(state.clone());
    let resp = app.oneshot(relay_form(&server.url("/"), "POST")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["method"], "POST");
    assert_eq!(body["status_code"], 201);
    assert!(body["response"].as_str().unwrap().contains("Mocked POST response"));
    assert_eq!(state.activity().snapshot()[0].response_code, 201);
}
