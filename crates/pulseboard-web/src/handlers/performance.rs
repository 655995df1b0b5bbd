use axum::{extract::State, response::Html};
use pulseboard_core::metrics::{MetricsSnapshot, ProcessInputs};

use crate::app_state::AppState;
use crate::error::Result;
use crate::pages::{self, PerformancePage};

pub async fn app_performance(State(state): State<AppState>) -> Result<Html<String>> {
    let records = state.activity().snapshot();
    let inputs = ProcessInputs {
        uptime: state.uptime(),
        active_sessions: state.sessions().active_sessions(),
    };
    let snapshot = MetricsSnapshot::collect(&records, state.memory_probe(), inputs)?;
    let rows = snapshot.display_rows();
    pages::render(&PerformancePage { rows: &rows })
}
