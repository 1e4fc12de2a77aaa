//! Core types for mailgraph.

mod entity;
mod graph;
mod search_result;

pub use entity::*;
pub use graph::*;
pub use search_result::*;
