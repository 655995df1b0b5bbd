use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::session::Session;

pub async fn clear_session(Extension(session): Extension<Session>) -> Json<Value> {
    session.clear();
    Json(json!({ "success": true }))
}
