//! Incident response HTTP server.
//!
//! Serves the incident collection, rule-engine analysis, reports, and the
//! action log over a small JSON API backed by a flat file.

use std::net::SocketAddr;

use incident_response::{config::Config, create_router, AppState, IncidentStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "incident_response=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Incident response server starting...");
    tracing::info!("Incident file: {}", config.incident_file.display());

    let store = IncidentStore::new(&config.incident_file, &config.log_file);

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port");
    axum::serve(listener, app).await.expect("Server error");
}
