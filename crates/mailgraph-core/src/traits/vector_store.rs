//! Vector store trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MailgraphResult;

/// A nearest-neighbor match returned by a vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Unique identifier of the stored item.
    pub id: String,
    /// Similarity score.
    pub score: f32,
    /// Metadata payload. Key casing is not guaranteed to be consistent.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Index statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Index name.
    pub name: String,
    /// Vector dimension.
    pub dimension: usize,
    /// Number of stored vectors.
    pub vector_count: u64,
}

/// Core VectorStore trait - the read side of a managed vector index.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return the `top_k` nearest stored items to `query_vector`.
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> MailgraphResult<Vec<VectorMatch>>;

    /// Get index statistics.
    async fn stats(&self) -> MailgraphResult<IndexStats>;

    /// Get the index name.
    fn index_name(&self) -> &str;
}

/// Vector store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: VectorStoreProvider,
    /// Index name.
    #[serde(default = "default_index_name")]
    pub index_name: String,
    /// Data plane host. Resolved through the control plane when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Namespace within the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Embedding dimensions.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_index_name() -> String {
    "enron-enterprise-kg".to_string()
}

fn default_dimension() -> usize {
    384
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: VectorStoreProvider::Pinecone,
            index_name: default_index_name(),
            host: None,
            api_key: None,
            namespace: None,
            dimension: default_dimension(),
        }
    }
}

/// Vector store provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreProvider {
    #[default]
    Pinecone,
}
