//! Reporting handlers

use axum::extract::State;
use axum::Json;

use crate::models::{Insights, SummaryReport};
use crate::report;
use crate::{AppResult, AppState};

/// Generate the summary report over the full collection
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryReport>> {
    let incidents = state.store.load_all()?;
    let report = report::summary_report(&incidents);
    state.store.log_action("AI summary report generated");
    Ok(Json(report))
}

/// Dashboard insight aggregate
pub async fn insights(State(state): State<AppState>) -> AppResult<Json<Insights>> {
    let incidents = state.store.load_all()?;
    Ok(Json(report::insights(&incidents)))
}
