//! Summary statistics for a communication graph.

use serde::Serialize;

use crate::types::CommunicationGraph;

/// Number of nodes reported in [`GraphStats::top_nodes`] by default.
pub const DEFAULT_TOP_NODES: usize = 5;

/// A node with its weighted degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDegree {
    pub node: String,
    pub weighted_degree: u64,
}

/// Network size, density and the most connected participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_weight: u64,
    pub density: f64,
    pub top_nodes: Vec<NodeDegree>,
}

impl GraphStats {
    pub fn from_graph(graph: &CommunicationGraph) -> Self {
        Self::with_top_nodes(graph, DEFAULT_TOP_NODES)
    }

    /// Ties on weighted degree are ordered by node name.
    pub fn with_top_nodes(graph: &CommunicationGraph, top: usize) -> Self {
        let mut degrees: Vec<NodeDegree> = graph
            .nodes()
            .map(|node| NodeDegree {
                node: node.to_string(),
                weighted_degree: graph.weighted_degree(node),
            })
            .collect();
        degrees.sort_by(|a, b| {
            b.weighted_degree
                .cmp(&a.weighted_degree)
                .then_with(|| a.node.cmp(&b.node))
        });
        degrees.truncate(top);

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            total_weight: graph.total_weight(),
            density: graph.density(),
            top_nodes: degrees,
        }
    }
}
