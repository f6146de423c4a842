//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/download-files", post(handlers::download_files))
        .route("/api/downloaded-files", get(handlers::downloaded_files))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
