//! mailgraph-vector-stores - Vector store implementations for mailgraph.
//!
//! Only the read side is implemented: the email index is populated offline
//! and queried here by nearest neighbor.
//!
//! # Supported Backends
//!
//! - **Pinecone** - managed index reached over its REST data plane
//!
//! # Example
//!
//! ```ignore
//! use mailgraph_vector_stores::VectorStoreFactory;
//!
//! let store = VectorStoreFactory::create(config.vector_store).await?;
//! let matches = store.search(&query_vector, 5, true).await?;
//! ```

mod factory;
pub mod pinecone;

pub use factory::VectorStoreFactory;
pub use pinecone::PineconeVectorStore;

// Re-export core types for convenience
pub use mailgraph_core::traits::{
    IndexStats, VectorMatch, VectorStore, VectorStoreConfig, VectorStoreProvider,
};
