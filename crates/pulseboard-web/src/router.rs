//! Axum router wiring.
//!
//! Layer order (outermost first): panic catcher, tracing, session, activity
//! interceptor, panic catcher, routes. Static assets are nested under the
//! configured prefix.

use std::any::Any;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, set_header::SetResponseHeader,
    trace::TraceLayer,
};

use crate::{app_state::AppState, error, handlers, interceptor, session};

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error::internal_error(&message)
}

type StaticAssets = SetResponseHeader<ServeDir, HeaderValue>;

fn static_assets(state: &AppState) -> StaticAssets {
    let server = &state.cfg().server;
    let cache_control = HeaderValue::from_str(&format!(
        "public, max-age={}",
        server.static_max_age_secs
    ))
    .unwrap_or(HeaderValue::from_static("public, max-age=31536000"));

    SetResponseHeader::if_not_present(
        ServeDir::new(&server.static_dir),
        header::CACHE_CONTROL,
        cache_control,
    )
}

/// The application's route table, before any layers.
pub fn routes(state: &AppState) -> Router<AppState> {
    let static_mount = state.exclusions().static_prefix().trim_end_matches('/').to_string();

    Router::new()
        .route("/", get(handlers::index))
        .route("/app-performance", get(handlers::performance::app_performance))
        .route("/user-activity", get(handlers::activity::user_activity))
        .route("/clear-log", post(handlers::activity::clear_log))
        .route(
            "/request-analysis",
            get(handlers::relay::form).post(handlers::relay::submit),
        )
        .route("/clear-session", post(handlers::session::clear_session))
        .route("/healthz", get(handlers::ops::healthz))
        .route("/metrics", get(handlers::ops::metrics))
        .nest_service(&static_mount, static_assets(state))
        .fallback(handlers::not_found)
}

/// Wrap `routes` in the middleware stack and bind the state.
///
/// The inner panic catcher sits below the activity interceptor so a panicking
/// handler is recorded as a 500; the outer one covers the middleware itself.
pub fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), interceptor::track_activity))
        .layer(middleware::from_fn_with_state(state.clone(), session::attach_session))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

pub fn build_router(state: AppState) -> Router {
    with_layers(routes(&state), state)
}
