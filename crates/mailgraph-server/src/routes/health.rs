//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub components: ComponentStatus,
}

/// Which backends were created at startup. No remote calls are made.
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub embedder: bool,
    pub vector_store: bool,
    pub graph_store: bool,
}

/// Health check endpoint.
/// GET /health
///
/// Reports `degraded` when search backends are missing; searches still
/// answer in that state, with empty results and a demo graph.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = state.service();
    let components = ComponentStatus {
        embedder: service.has_embedder(),
        vector_store: service.vector_store().is_some(),
        graph_store: service.has_graph_store(),
    };
    let status = if components.embedder && components.vector_store {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components,
    })
}
