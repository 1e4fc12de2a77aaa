//! Search orchestration: embed, retrieve, detect, assemble.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entity::EntityDetector;
use crate::error::{MailgraphError, MailgraphResult};
use crate::graph::{AssembledGraph, GraphAssembler, GraphSource, GraphStats};
use crate::traits::{Embedder, VectorStore};
use crate::types::{CommunicationGraph, EntityKey, SearchResult, DEFAULT_BODY_PREVIEW_CHARS};

/// Pinecone's ceiling for `top_k` when metadata is requested.
pub const MAX_TOP_K: usize = 1000;

/// Configuration for the retrieval step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of nearest matches requested from the vector store.
    pub top_k: usize,
    /// Body preview length, in characters.
    pub body_preview_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            body_preview_chars: DEFAULT_BODY_PREVIEW_CHARS,
        }
    }
}

/// Everything a caller needs to render one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub entity: Option<EntityKey>,
    pub graph: CommunicationGraph,
    pub graph_source: GraphSource,
    pub stats: GraphStats,
    /// Degraded stages, e.g. an unreachable vector store.
    pub warnings: Vec<String>,
}

/// Runs a search request end to end.
///
/// Remote failures never fail the request: a missing or erroring embedder or
/// vector store yields an empty result set plus a warning, and the graph
/// assembler has its own fallbacks. Only an empty query is rejected.
pub struct SearchService {
    embedder: Option<Arc<dyn Embedder>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    detector: EntityDetector,
    assembler: GraphAssembler,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(
        embedder: Option<Arc<dyn Embedder>>,
        vector_store: Option<Arc<dyn VectorStore>>,
        detector: EntityDetector,
        assembler: GraphAssembler,
        config: SearchConfig,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            detector,
            assembler,
            config,
        }
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    pub fn vector_store(&self) -> Option<&Arc<dyn VectorStore>> {
        self.vector_store.as_ref()
    }

    pub fn has_graph_store(&self) -> bool {
        self.assembler.has_graph_store()
    }

    /// Search for `query`, requesting `top_k` matches (config default if
    /// `None`). `top_k` must lie in `1..=MAX_TOP_K`.
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> MailgraphResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MailgraphError::validation_with_suggestion(
                "Query must not be empty",
                "Try a query such as 'sherron watkins accounting concerns'",
            ));
        }

        let top_k = top_k.unwrap_or(self.config.top_k);
        if !(1..=MAX_TOP_K).contains(&top_k) {
            return Err(MailgraphError::validation_with_suggestion(
                format!("top_k must be between 1 and {}, got {}", MAX_TOP_K, top_k),
                "Request between 5 and 20 matches for a readable graph",
            ));
        }
        let mut warnings = Vec::new();
        let results = match self.retrieve(query, top_k).await {
            Ok(results) => results,
            Err(warning) => {
                warnings.push(warning);
                Vec::new()
            }
        };

        let entity = self.detector.detect(&results);
        let AssembledGraph { graph, source } = self.assembler.build(entity.as_ref(), &results).await;
        let stats = GraphStats::from_graph(&graph);

        info!(
            results = results.len(),
            entity = entity.as_ref().map(EntityKey::as_str),
            graph_source = ?source,
            "Search completed"
        );

        Ok(SearchOutcome {
            query: query.to_string(),
            results,
            entity,
            graph,
            graph_source: source,
            stats,
            warnings,
        })
    }

    /// Detect the dominant entity of `results`.
    pub fn detect(&self, results: &[SearchResult]) -> Option<EntityKey> {
        self.detector.detect(results)
    }

    pub fn detector(&self) -> &EntityDetector {
        &self.detector
    }

    /// Build the communication graph for `focus` and `results`.
    pub async fn build_graph(
        &self,
        focus: Option<&EntityKey>,
        results: &[SearchResult],
    ) -> AssembledGraph {
        self.assembler.build(focus, results).await
    }

    /// Embed and query. The error is a human-readable warning naming the
    /// stage that failed.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, String> {
        let (Some(embedder), Some(vector_store)) = (&self.embedder, &self.vector_store) else {
            warn!("Search backends unavailable, returning no results");
            return Err("search backends unavailable".to_string());
        };

        let vector = embedder.embed(query).await.map_err(|e| {
            warn!(error = %e, "Query embedding failed");
            format!("embedding failed: {}", e)
        })?;

        let matches = vector_store
            .search(&vector, top_k, true)
            .await
            .map_err(|e| {
                warn!(index = vector_store.index_name(), error = %e, "Vector search failed");
                format!("vector search failed: {}", e)
            })?;

        debug!(matches = matches.len(), "Vector search returned");

        Ok(matches
            .iter()
            .map(|m| SearchResult::from_metadata(&m.metadata, m.score, self.config.body_preview_chars))
            .collect())
    }
}
