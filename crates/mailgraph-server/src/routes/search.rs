//! Search, entity detection and graph assembly endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use mailgraph_core::entity::EntityScore;
use mailgraph_core::{
    CommunicationGraph, EntityKey, GraphSource, GraphStats, SearchOutcome, SearchResult,
};

use super::check_limit;
use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for a search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,
    /// Number of matches to retrieve (server default if absent).
    pub top_k: Option<usize>,
}

/// Search the corpus, detect the dominant entity and assemble its graph.
/// POST /search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchOutcome>> {
    let top_k = request
        .top_k
        .map(|top_k| check_limit("top_k", top_k))
        .transpose()?;
    let outcome = state.service().search(&request.query, top_k).await?;
    Ok(Json(outcome))
}

/// Request body carrying an already retrieved result set.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub entity: Option<EntityKey>,
    /// Per-entity scores in table order.
    pub scores: Vec<EntityScore>,
}

/// Detect the dominant entity of a result set.
/// POST /detect
pub async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Json<DetectResponse> {
    let detector = state.service().detector();
    let scores = detector.score(&request.results);
    Json(DetectResponse {
        entity: detector.detect(&request.results),
        scores: scores.iter().cloned().collect(),
    })
}

#[derive(Debug, Deserialize)]
pub struct GraphRequest {
    /// Focus entity for the graph store tier.
    pub entity: Option<EntityKey>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub graph: CommunicationGraph,
    pub source: GraphSource,
    pub stats: GraphStats,
}

/// Assemble the communication graph for an entity and result set.
/// POST /graph
pub async fn build_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphRequest>,
) -> Json<GraphResponse> {
    let assembled = state
        .service()
        .build_graph(request.entity.as_ref(), &request.results)
        .await;
    let stats = GraphStats::from_graph(&assembled.graph);
    Json(GraphResponse {
        graph: assembled.graph,
        source: assembled.source,
        stats,
    })
}
