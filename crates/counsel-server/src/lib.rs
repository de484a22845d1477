pub mod actions;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use counsel_core::model::ModelBackend;
use counsel_core::store::Store;

/// Shared state handed to every request handler. No other in-process state
/// is shared across requests.
pub struct AppState {
    pub store: Store,
    pub backend: Arc<dyn ModelBackend>,
}

/// Build the API router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(routes::health))
        // Documents
        .route("/api/documents", get(routes::list_documents))
        .route("/api/documents", post(routes::upload_documents))
        .route("/api/documents/:id", get(routes::get_document))
        .route("/api/documents/:id", delete(routes::delete_document))
        // Form fill
        .route("/api/form-fill", post(routes::form_fill))
        // Chat
        .route("/api/chat", post(routes::chat))
        // Similar cases
        .route("/api/cases", post(routes::similar_cases))
        .with_state(state)
}
