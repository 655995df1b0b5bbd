//! Request interceptor: times every request and feeds the activity log.
//!
//! Pre: stamp the session start (first tracked request only). Post: count the
//! request and append one record unless the path is excluded. Untracked paths
//! (static assets, ops endpoints) get no stamp and no record. Never fails the
//! response; handler panics reach this layer already turned into a 500.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use pulseboard_core::activity::log::now_epoch_secs;
use pulseboard_core::activity::ActivityRecord;

use crate::app_state::AppState;
use crate::session::{Session, START_TIME_KEY};

pub async fn track_activity(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let exclusions = state.exclusions();

    if !exclusions.is_untracked(&path) {
        if let Some(session) = req.extensions().get::<Session>() {
            if !session.contains(START_TIME_KEY) {
                session.insert(START_TIME_KEY, now_epoch_secs());
            }
        }
    }
    let started = Instant::now();

    let resp = next.run(req).await;
    let status = resp.status().as_u16();
    let elapsed = started.elapsed();

    let status_label = status.to_string();
    let labels = [("method", method.as_str()), ("status", status_label.as_str())];
    state.metrics().requests.inc(&labels);
    state.metrics().request_duration.observe(&[("method", method.as_str())], elapsed);

    if !exclusions.is_excluded(&path) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        state
            .activity()
            .append(ActivityRecord::completed(path, status, elapsed_ms));
    }
    resp
}
