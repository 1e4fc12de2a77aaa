//! Undirected weighted communication graph.
//!
//! Built fresh for every search request and never shared between requests.
//! Nodes and edges keep insertion order so layouts and API output are stable.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize, Serializer};

/// An undirected edge as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Undirected weighted graph over participant strings.
///
/// Edges are unordered pairs `(a, b)` with `a != b`; self-loops and empty
/// endpoints are rejected on insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationGraph {
    nodes: IndexSet<String>,
    edges: IndexMap<(String, String), u64>,
}

impl CommunicationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target, weight)` triples, overwriting
    /// the weight of repeated pairs.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str, u64)>) -> Self {
        let mut graph = Self::new();
        for (source, target, weight) in edges {
            graph.set_edge(source, target, weight);
        }
        graph
    }

    /// Insert an edge with the given weight, replacing any existing weight.
    ///
    /// Returns `false` (and leaves the graph untouched) for self-loops and
    /// empty endpoints.
    pub fn set_edge(&mut self, a: &str, b: &str, weight: u64) -> bool {
        match self.admit(a, b) {
            Some(key) => {
                self.edges.insert(key, weight);
                true
            }
            None => false,
        }
    }

    /// Record one observed communication between `a` and `b`: increments the
    /// edge weight, creating the edge with weight 1 if absent.
    pub fn record_communication(&mut self, a: &str, b: &str) -> bool {
        match self.admit(a, b) {
            Some(key) => {
                *self.edges.entry(key).or_insert(0) += 1;
                true
            }
            None => false,
        }
    }

    fn admit(&mut self, a: &str, b: &str) -> Option<(String, String)> {
        if a.is_empty() || b.is_empty() || a == b {
            return None;
        }
        self.nodes.insert(a.to_string());
        self.nodes.insert(b.to_string());
        Some(edge_key(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    /// Weight of the edge between `a` and `b`, in either direction.
    pub fn weight(&self, a: &str, b: &str) -> Option<u64> {
        self.edges.get(&edge_key(a, b)).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.edges.iter().map(|((source, target), weight)| GraphEdge {
            source: source.clone(),
            target: target.clone(),
            weight: *weight,
        })
    }

    /// Sum of the weights of all edges touching `node`.
    pub fn weighted_degree(&self, node: &str) -> u64 {
        self.edges
            .iter()
            .filter(|((a, b), _)| a == node || b == node)
            .map(|(_, w)| *w)
            .sum()
    }

    pub fn total_weight(&self) -> u64 {
        self.edges.values().sum()
    }

    /// Undirected density: `2E / (N(N-1))`, zero for fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        let possible = (n * (n - 1)) as f64;
        (2 * self.edges.len()) as f64 / possible
    }
}

fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[derive(Serialize)]
struct GraphWire<'a> {
    nodes: Vec<&'a str>,
    edges: Vec<GraphEdge>,
}

impl Serialize for CommunicationGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphWire {
            nodes: self.nodes().collect(),
            edges: self.edges().collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_loops_and_empty_endpoints_rejected() {
        let mut graph = CommunicationGraph::new();
        assert!(!graph.set_edge("a@x", "a@x", 3));
        assert!(!graph.record_communication("", "b@x"));
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_record_communication_accumulates_undirected() {
        let mut graph = CommunicationGraph::new();
        graph.record_communication("a@x", "b@x");
        graph.record_communication("b@x", "a@x");
        graph.record_communication("a@x", "b@x");

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("a@x", "b@x"), Some(3));
        assert_eq!(graph.weight("b@x", "a@x"), Some(3));
    }

    #[test]
    fn test_set_edge_overwrites() {
        let mut graph = CommunicationGraph::new();
        graph.set_edge("a@x", "b@x", 4);
        graph.set_edge("b@x", "a@x", 9);
        assert_eq!(graph.weight("a@x", "b@x"), Some(9));
    }

    #[test]
    fn test_density_and_degree() {
        let graph = CommunicationGraph::from_edges([("a", "b", 2), ("b", "c", 5)]);
        assert_eq!(graph.node_count(), 3);
        assert!((graph.density() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(graph.weighted_degree("b"), 7);
        assert_eq!(graph.total_weight(), 7);
        assert_eq!(CommunicationGraph::new().density(), 0.0);
    }

    #[test]
    fn test_serializes_nodes_and_edges() {
        let graph = CommunicationGraph::from_edges([("b@x", "a@x", 1)]);
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["nodes"], serde_json::json!(["b@x", "a@x"]));
        assert_eq!(value["edges"][0]["source"], "a@x");
        assert_eq!(value["edges"][0]["weight"], 1);
    }
}
