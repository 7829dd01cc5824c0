//! Action log handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
}

/// Raw action-log lines, oldest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<LogsResponse>> {
    let logs = state.store.read_log()?;
    Ok(Json(LogsResponse { logs }))
}
