//! End-to-end tests for the search service with in-process providers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mailgraph_core::traits::{ActivityBucket, Communicator, Connection, IndexStats, SentEdge};
use mailgraph_core::{
    AssemblerConfig, Embedder, EntityDetector, EntityKey, GraphAssembler, GraphSource, GraphStore,
    KeywordTable, MailgraphError, MailgraphResult, Neighbor, SearchConfig, SearchService,
    VectorMatch, VectorStore, MAX_TOP_K,
};
use serde_json::json;

struct ConstantEmbedder;

#[async_trait]
impl Embedder for ConstantEmbedder {
    async fn embed(&self, _text: &str) -> MailgraphResult<Vec<f32>> {
        Ok(vec![0.1; 4])
    }

    fn dimension(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "constant"
    }
}

struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> MailgraphResult<Vec<f32>> {
        Err(MailgraphError::embedding("model not loaded"))
    }

    fn dimension(&self) -> usize {
        4
    }

    fn model_name(&self) -> &str {
        "broken"
    }
}

/// Returns canned matches, honoring `top_k`.
struct CannedIndex {
    matches: Vec<VectorMatch>,
}

impl CannedIndex {
    fn enron() -> Self {
        let rows = [
            (
                json!({"From": "sherron.watkins@enron.com", "To": "kenneth.lay@enron.com",
                       "Subject": "Accounting", "text": "I am incredibly nervous"}),
                0.91,
            ),
            (
                json!({"from": "jeff.dasovich@enron.com", "to": "kenneth.lay@enron.com, jeff.skilling@enron.com",
                       "subject": "California", "body": "energy crisis update"}),
                0.74,
            ),
            (json!({"Sender": "unknown-list@enron.com"}), 0.40),
        ];

        let matches = rows
            .into_iter()
            .enumerate()
            .map(|(i, (metadata, score))| VectorMatch {
                id: format!("email-{}", i),
                score,
                metadata: serde_json::from_value::<HashMap<String, serde_json::Value>>(metadata)
                    .unwrap(),
            })
            .collect();

        Self { matches }
    }
}

#[async_trait]
impl VectorStore for CannedIndex {
    async fn search(
        &self,
        _query_vector: &[f32],
        top_k: usize,
        _include_metadata: bool,
    ) -> MailgraphResult<Vec<VectorMatch>> {
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }

    async fn stats(&self) -> MailgraphResult<IndexStats> {
        Ok(IndexStats {
            name: "canned".to_string(),
            dimension: 4,
            vector_count: self.matches.len() as u64,
        })
    }

    fn index_name(&self) -> &str {
        "canned"
    }
}

struct DownGraphStore;

#[async_trait]
impl GraphStore for DownGraphStore {
    async fn neighbors(&self, _entity: &str, _limit: usize) -> MailgraphResult<Vec<Neighbor>> {
        Err(MailgraphError::graph_connection("routing table unavailable"))
    }

    async fn top_communicators(&self, _limit: usize) -> MailgraphResult<Vec<Communicator>> {
        Err(MailgraphError::graph_connection("routing table unavailable"))
    }

    async fn connections(&self, _limit: usize) -> MailgraphResult<Vec<Connection>> {
        Err(MailgraphError::graph_connection("routing table unavailable"))
    }

    async fn activity(&self, _limit: usize) -> MailgraphResult<Vec<ActivityBucket>> {
        Err(MailgraphError::graph_connection("routing table unavailable"))
    }

    async fn sent_edges(&self, _limit: usize) -> MailgraphResult<Vec<SentEdge>> {
        Err(MailgraphError::graph_connection("routing table unavailable"))
    }
}

fn service(
    embedder: Option<Arc<dyn Embedder>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    graph_store: Option<Arc<dyn GraphStore>>,
) -> SearchService {
    SearchService::new(
        embedder,
        vector_store,
        EntityDetector::new(KeywordTable::enron()),
        GraphAssembler::new(graph_store, AssemblerConfig::default()),
        SearchConfig::default(),
    )
}

#[tokio::test]
async fn test_search_detects_entity_and_builds_result_graph() {
    let service = service(
        Some(Arc::new(ConstantEmbedder)),
        Some(Arc::new(CannedIndex::enron())),
        Some(Arc::new(DownGraphStore)),
    );

    let outcome = service.search("  accounting concerns ", None).await.unwrap();

    assert_eq!(outcome.query, "accounting concerns");
    assert_eq!(outcome.results.len(), 3);
    assert!(outcome.warnings.is_empty());
    // sherron and dasovich both score 6 from sender matches; dasovich is
    // declared first. Recipients are not scored.
    assert_eq!(
        outcome.entity,
        Some(EntityKey::from("jeff.dasovich@enron.com"))
    );
    // The graph store is down, so the graph comes from the results.
    assert_eq!(outcome.graph_source, GraphSource::SearchResults);
    assert_eq!(outcome.stats.edge_count, 3);
    assert_eq!(
        outcome
            .graph
            .weight("sherron.watkins@enron.com", "kenneth.lay@enron.com"),
        Some(1)
    );
    assert_eq!(outcome.results[2].recipients(), "Unknown");
}

#[tokio::test]
async fn test_search_honors_top_k() {
    let service = service(
        Some(Arc::new(ConstantEmbedder)),
        Some(Arc::new(CannedIndex::enron())),
        None,
    );

    let outcome = service.search("accounting", Some(1)).await.unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(
        outcome.entity,
        Some(EntityKey::from("sherron.watkins@enron.com"))
    );
}

#[tokio::test]
async fn test_embedding_failure_degrades_to_demo_graph() {
    let service = service(
        Some(Arc::new(BrokenEmbedder)),
        Some(Arc::new(CannedIndex::enron())),
        None,
    );

    let outcome = service.search("anything", None).await.unwrap();
    assert!(outcome.results.is_empty());
    assert!(outcome.entity.is_none());
    assert_eq!(outcome.graph_source, GraphSource::Demo);
    assert_eq!(outcome.graph.edge_count(), 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("embedding failed"));
}

#[tokio::test]
async fn test_missing_backends_degrade() {
    let service = service(None, None, None);
    let outcome = service.search("anything", None).await.unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.graph_source, GraphSource::Demo);
    assert_eq!(outcome.warnings, vec!["search backends unavailable".to_string()]);
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let service = service(None, None, None);
    let err = service.search("   ", None).await.unwrap_err();
    assert!(matches!(err, MailgraphError::Validation { .. }));
}

#[tokio::test]
async fn test_top_k_out_of_range_rejected() {
    let service = service(None, None, None);
    for top_k in [0, MAX_TOP_K + 1] {
        let err = service.search("gas trading", Some(top_k)).await.unwrap_err();
        assert!(matches!(err, MailgraphError::Validation { .. }));
    }
    assert!(service.search("gas trading", Some(MAX_TOP_K)).await.is_ok());
}
