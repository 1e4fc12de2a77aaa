//! Builds the application state from configuration.
//!
//! Each remote component is created on its own. A component that cannot be
//! created is logged and left out; the search service then degrades instead
//! of the process refusing to start.

use std::sync::Arc;

use mailgraph_core::traits::{Embedder, GraphStore, VectorStore};
use mailgraph_core::{EntityDetector, GraphAssembler, MailgraphConfig, SearchService};
use mailgraph_embeddings::EmbedderFactory;
use mailgraph_graph_stores::GraphStoreFactory;
use mailgraph_vector_stores::VectorStoreFactory;
use tracing::{info, warn};

use crate::state::AppState;

/// Create the application state, connecting to every configured backend.
pub async fn create_state(config: MailgraphConfig) -> AppState {
    let embedder = create_embedder(&config);
    let vector_store = create_vector_store(&config).await;
    let graph_store = create_graph_store(&config).await;

    info!(
        embedder = embedder.is_some(),
        vector_store = vector_store.is_some(),
        graph_store = graph_store.is_some(),
        entities = config.entities.len(),
        "Backends initialized"
    );

    let service = SearchService::new(
        embedder,
        vector_store,
        EntityDetector::new(config.entities),
        GraphAssembler::new(graph_store.clone(), config.graph),
        config.search,
    );
    AppState::new(service, graph_store)
}

fn create_embedder(config: &MailgraphConfig) -> Option<Arc<dyn Embedder>> {
    EmbedderFactory::create(config.embedder.provider, config.embedder.config.clone())
        .map_err(|e| warn!(error = %e, "Embedder unavailable"))
        .ok()
}

async fn create_vector_store(config: &MailgraphConfig) -> Option<Arc<dyn VectorStore>> {
    VectorStoreFactory::create(config.vector_store.clone())
        .await
        .map_err(|e| warn!(index = %config.vector_store.index_name, error = %e, "Vector store unavailable"))
        .ok()
}

async fn create_graph_store(config: &MailgraphConfig) -> Option<Arc<dyn GraphStore>> {
    let Some(graph_config) = config.graph_store.clone() else {
        info!("No graph store configured, graphs will come from search results");
        return None;
    };

    GraphStoreFactory::create(graph_config)
        .await
        .map_err(|e| warn!(error = %e, "Graph store unavailable"))
        .ok()
}
