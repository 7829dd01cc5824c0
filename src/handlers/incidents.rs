//! Incident handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::JsonOrForm;
use crate::analyzer;
use crate::models::{
    Analysis, AnalyzeRequest, CreateIncidentRequest, Incident, Priority, UpdateIncidentRequest,
};
use crate::{AppError, AppResult, AppState};

/// List all incidents
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Incident>>> {
    let incidents = state.store.load_all()?;
    Ok(Json(incidents))
}

/// Run the rule engine over a description without persisting anything
pub async fn analyze(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<AnalyzeRequest>,
) -> AppResult<Json<Analysis>> {
    let description = req.description.trim();
    if description.is_empty() {
        return Err(AppError::blank_description());
    }

    let analysis = analyzer::analyze(description);
    state
        .store
        .log_action(&format!("AI analysis performed for: {}", description));

    Ok(Json(analysis))
}

/// Create a new incident, optionally with AI analysis
pub async fn create(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<CreateIncidentRequest>,
) -> AppResult<(StatusCode, Json<Incident>)> {
    let description = req.description.trim();
    if description.is_empty() {
        return Err(AppError::blank_description());
    }

    // Invalid priorities coerce to Medium, never reject.
    let mut priority = req
        .priority
        .as_deref()
        .and_then(Priority::parse)
        .unwrap_or(Priority::Medium);

    let analysis = if req.use_ai {
        let analysis = analyzer::analyze(description);
        // The suggestion only wins when the caller left priority unset.
        if !req.has_explicit_priority() {
            priority = analysis.suggested_priority;
        }
        Some(analysis)
    } else {
        None
    };

    let incident = state.store.create(description, priority, analysis)?;
    Ok((StatusCode::CREATED, Json(incident)))
}

/// Update an incident's description, optionally re-running analysis
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonOrForm(req): JsonOrForm<UpdateIncidentRequest>,
) -> AppResult<Json<Incident>> {
    let incident = state.store.update(id, &req.description, req.reanalyze)?;
    Ok(Json(incident))
}

/// Mark an incident resolved
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Incident>> {
    let incident = state.store.resolve(id)?;
    Ok(Json(incident))
}

/// Delete an incident, returning the removed record
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Incident>> {
    let incident = state.store.delete(id)?;
    Ok(Json(incident))
}
