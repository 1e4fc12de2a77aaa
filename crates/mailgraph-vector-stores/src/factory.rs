//! Factory for creating vector store providers.

use std::sync::Arc;

use mailgraph_core::error::MailgraphResult;
use mailgraph_core::traits::{VectorStore, VectorStoreConfig, VectorStoreProvider};

use crate::pinecone::PineconeVectorStore;

/// Factory for creating vector store providers.
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    /// Create a vector store from the given configuration.
    pub async fn create(config: VectorStoreConfig) -> MailgraphResult<Arc<dyn VectorStore>> {
        match config.provider {
            VectorStoreProvider::Pinecone => {
                let store = PineconeVectorStore::new(config).await?;
                Ok(Arc::new(store))
            }
        }
    }
}
