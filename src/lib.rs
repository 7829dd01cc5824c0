//! AI-enhanced incident response tracker.
//!
//! A rule-based "AI" analyzer classifies free-text incident descriptions
//! (priority, category, risk, response steps), a flat JSON file holds the
//! incident collection, and two front ends share the same storage: an Axum
//! HTTP API (`ir-server`) and an interactive terminal menu (`ir-cli`).

pub mod analyzer;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod report;
pub mod store;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::IncidentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: IncidentStore,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/incidents", get(handlers::incidents::list))
        .route("/incidents", post(handlers::incidents::create))
        .route("/incidents/analyze", post(handlers::incidents::analyze))
        .route("/incidents/:id", put(handlers::incidents::update))
        .route("/incidents/:id", delete(handlers::incidents::delete))
        .route("/incidents/:id/resolve", patch(handlers::incidents::resolve))
        .route("/reports/summary", get(handlers::reports::summary))
        .route("/insights", get(handlers::reports::insights))
        .route("/logs", get(handlers::logs::list))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
