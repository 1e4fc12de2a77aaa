//! Factory for creating graph store providers.

use std::sync::Arc;

use mailgraph_core::error::{MailgraphError, MailgraphResult};
use mailgraph_core::traits::{GraphStore, GraphStoreConfig, GraphStoreProvider};

/// Factory for creating graph store providers.
pub struct GraphStoreFactory;

impl GraphStoreFactory {
    /// Create a graph store from the given configuration.
    pub async fn create(config: GraphStoreConfig) -> MailgraphResult<Arc<dyn GraphStore>> {
        match config.provider {
            #[cfg(feature = "neo4j")]
            GraphStoreProvider::Neo4j | GraphStoreProvider::Memgraph => {
                let store = crate::neo4j::Neo4jGraphStore::new(config).await?;
                Ok(Arc::new(store))
            }

            #[allow(unreachable_patterns)]
            provider => Err(MailgraphError::UnsupportedProvider {
                provider: format!("{:?}", provider),
            }),
        }
    }
}
