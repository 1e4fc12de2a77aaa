//! Index statistics and graph analytics endpoints.
//!
//! Unlike search, these surface backend failures as errors.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use mailgraph_core::graph::{detect_communities, Community};
use mailgraph_core::traits::{ActivityBucket, Communicator, Connection, GraphStore, IndexStats};

use super::check_limit;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_COMMUNICATORS: usize = 10;
const DEFAULT_ACTIVITY_BUCKETS: usize = 50;
/// Rows of SENT traffic sampled for community grouping.
const DEFAULT_EDGE_SAMPLE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    fn resolve(&self, default: usize) -> ApiResult<usize> {
        match self.limit {
            None => Ok(default),
            Some(limit) => check_limit("limit", limit),
        }
    }
}

fn graph_store(state: &AppState) -> ApiResult<&dyn GraphStore> {
    state
        .graph_store()
        .map(|store| store.as_ref())
        .ok_or_else(|| ApiError::unavailable("Graph store"))
}

/// Vector index statistics.
/// GET /index/stats
pub async fn index_stats(State(state): State<AppState>) -> ApiResult<Json<IndexStats>> {
    let store = state
        .service()
        .vector_store()
        .ok_or_else(|| ApiError::unavailable("Vector store"))?;
    Ok(Json(store.stats().await?))
}

#[derive(Debug, Serialize)]
pub struct CommunicatorsResponse {
    pub communicators: Vec<Communicator>,
}

/// Most active senders.
/// GET /insights/communicators?limit=10
pub async fn top_communicators(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<CommunicatorsResponse>> {
    let limit = query.resolve(DEFAULT_COMMUNICATORS)?;
    let communicators = graph_store(&state)?.top_communicators(limit).await?;
    Ok(Json(CommunicatorsResponse { communicators }))
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub activity: Vec<ActivityBucket>,
}

/// Message volume over time.
/// GET /insights/activity?limit=50
pub async fn activity(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<ActivityResponse>> {
    let limit = query.resolve(DEFAULT_ACTIVITY_BUCKETS)?;
    let activity = graph_store(&state)?.activity(limit).await?;
    Ok(Json(ActivityResponse { activity }))
}

#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<Connection>,
}

/// People ranked by how many others they wrote to.
/// GET /insights/connections?limit=10
pub async fn connections(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<ConnectionsResponse>> {
    let limit = query.resolve(DEFAULT_COMMUNICATORS)?;
    let connections = graph_store(&state)?.connections(limit).await?;
    Ok(Json(ConnectionsResponse { connections }))
}

#[derive(Debug, Serialize)]
pub struct CommunitiesResponse {
    pub communities: Vec<Community>,
    /// Number of sender/recipient rows the grouping was computed from.
    pub edges_sampled: usize,
}

/// Communication communities within a sample of SENT traffic.
/// GET /insights/communities?limit=100
pub async fn communities(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<CommunitiesResponse>> {
    let limit = query.resolve(DEFAULT_EDGE_SAMPLE)?;
    let edges = graph_store(&state)?.sent_edges(limit).await?;
    Ok(Json(CommunitiesResponse {
        communities: detect_communities(&edges),
        edges_sampled: edges.len(),
    }))
}
