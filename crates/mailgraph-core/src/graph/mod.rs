//! Graph assembly and statistics.

mod assembler;
mod communities;
mod stats;

pub use assembler::{AssembledGraph, AssemblerConfig, DemoEdge, GraphAssembler, GraphSource};
pub use communities::{detect_communities, Community};
pub use stats::{GraphStats, NodeDegree, DEFAULT_TOP_NODES};
