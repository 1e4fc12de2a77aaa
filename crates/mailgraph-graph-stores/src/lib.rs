//! mailgraph-graph-stores - Graph store implementations for mailgraph.
//!
//! Read-only access to the communication graph built from the corpus:
//! neighbor lookups for graph assembly and two aggregate insight queries.
//!
//! # Supported Backends
//!
//! - **Neo4j** (feature: `neo4j`) - Neo4j / AuraDB over Bolt
//! - **Memgraph** (feature: `memgraph`) - same client, Memgraph defaults

pub mod cypher;
mod factory;

#[cfg(feature = "neo4j")]
mod neo4j;

pub use factory::GraphStoreFactory;

#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jGraphStore;

// Re-export core types
pub use mailgraph_core::traits::{GraphStore, GraphStoreConfig, GraphStoreProvider};
