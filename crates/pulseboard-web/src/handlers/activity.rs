use axum::{extract::State, response::Html, Json};
use pulseboard_core::activity::ActivityRow;
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::error::Result;
use crate::pages::{self, UserActivityPage};

pub async fn user_activity(State(state): State<AppState>) -> Result<Html<String>> {
    let rows: Vec<ActivityRow> = state.activity().snapshot().iter().map(ActivityRow::from).collect();
    pages::render(&UserActivityPage { rows: &rows })
}

pub async fn clear_log(State(state): State<AppState>) -> Json<Value> {
    state.activity().clear();
    Json(json!({ "success": true }))
}
