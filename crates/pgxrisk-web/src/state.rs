//! Shared application state for the web server.

use std::sync::Arc;

use pgxrisk_llm::LlmBackend;

/// Shared state injected into every Axum handler. All classification tables
/// are static, so the only shared resource is the text-generation backend.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn LlmBackend>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(backend: Arc<dyn LlmBackend>, max_upload_bytes: usize) -> Self {
        Self { backend, max_upload_bytes }
    }
}

pub type SharedState = Arc<AppState>;
