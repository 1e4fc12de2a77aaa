//! mailgraph-core - Core library for mailgraph.
//!
//! This crate provides the types, provider traits, entity detection and
//! graph assembly behind mailgraph's search-and-visualize API.
//!
//! # Example
//!
//! ```ignore
//! use mailgraph_core::{EntityDetector, GraphAssembler, KeywordTable, SearchService};
//!
//! let detector = EntityDetector::new(KeywordTable::enron());
//! let assembler = GraphAssembler::new(graph_store, AssemblerConfig::default());
//! let service = SearchService::new(embedder, vector_store, detector, assembler, config.search);
//!
//! let outcome = service.search("sherron watkins accounting concerns", None).await?;
//! println!("{:?} via {:?}", outcome.entity, outcome.graph_source);
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod graph;
pub mod search;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{EmbedderProviderConfig, MailgraphConfig};
pub use entity::{EntityDetector, EntityScores, KeywordTable};
pub use error::{ErrorCode, MailgraphError, MailgraphResult};
pub use graph::{AssembledGraph, AssemblerConfig, GraphAssembler, GraphSource, GraphStats};
pub use search::{SearchConfig, SearchOutcome, SearchService, MAX_TOP_K};
pub use traits::{
    Embedder, EmbedderConfig, EmbedderProvider, GraphStore, GraphStoreConfig, GraphStoreProvider,
    Neighbor, VectorMatch, VectorStore, VectorStoreConfig, VectorStoreProvider,
};
pub use types::{CommunicationGraph, EntityKey, GraphEdge, SearchResult, UNKNOWN};
