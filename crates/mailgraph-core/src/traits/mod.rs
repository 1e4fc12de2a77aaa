//! Core traits for mailgraph providers.

mod embedder;
mod graph_store;
mod vector_store;

pub use embedder::*;
pub use graph_store::*;
pub use vector_store::*;
