//! Route definitions for the REST API.

mod health;
mod insights;
mod search;

use axum::{
    routing::{get, post},
    Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound for any caller-supplied row or match count.
const MAX_LIMIT: usize = 1000;

fn check_limit(name: &str, value: usize) -> ApiResult<usize> {
    if (1..=MAX_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::bad_request(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_LIMIT, value
        )))
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Search and graph assembly
        .route("/search", post(search::search))
        .route("/detect", post(search::detect))
        .route("/graph", post(search::build_graph))
        // Index and graph analytics
        .route("/index/stats", get(insights::index_stats))
        .route("/insights/communicators", get(insights::top_communicators))
        .route("/insights/connections", get(insights::connections))
        .route("/insights/activity", get(insights::activity))
        .route("/insights/communities", get(insights::communities))
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use insights::*;
pub use search::*;
