//! Health check handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Number of stored incidents; absent when the store is unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    incident_count: Option<usize>,
    timestamp: i64,
}

/// Probe the store along with the process: a missing incident file is an
/// empty, healthy store, but an unreadable one degrades the probe instead
/// of failing the request.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, incident_count) = match state.store.load_all() {
        Ok(incidents) => ("healthy", Some(incidents.len())),
        Err(_) => ("degraded", None),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        incident_count,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
