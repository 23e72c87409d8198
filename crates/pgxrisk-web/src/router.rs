//! Axum router — maps URL paths to handlers.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{analyze::analyze, index::index_page, system::health};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    // Leave headroom above the payload limit for multipart framing
    let body_limit = state.max_upload_bytes + 64 * 1024;
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
