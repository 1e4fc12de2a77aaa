//! Three-tier construction of the communication graph shown for a search.
//!
//! Tiers run in strict order and each runs only if everything before it
//! produced zero nodes:
//!
//! 1. **Graph store** - neighbors of the focus entity.
//! 2. **Search results** - sender/recipient pairs of the results.
//! 3. **Demo** - a small constant topology.
//!
//! The returned graph is never empty.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::traits::GraphStore;
use crate::types::{CommunicationGraph, EntityKey, SearchResult, UNKNOWN};

/// Which tier supplied the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphSource {
    GraphStore,
    SearchResults,
    Demo,
}

/// A weighted edge of the demo topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

impl DemoEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Configuration for graph assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Maximum neighbor rows requested from the graph store.
    pub neighbor_limit: usize,
    /// Recipients taken from each result; keeps one broadcast email from
    /// turning into a dense star.
    pub max_recipients_per_result: usize,
    /// Edges of the last-resort topology.
    pub demo_edges: Vec<DemoEdge>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            neighbor_limit: 25,
            max_recipients_per_result: 3,
            demo_edges: default_demo_edges(),
        }
    }
}

fn default_demo_edges() -> Vec<DemoEdge> {
    vec![
        DemoEdge::new("jeff.dasovich@enron.com", "kenneth.lay@enron.com", 10),
        DemoEdge::new("sherron.watkins@enron.com", "kenneth.lay@enron.com", 15),
    ]
}

/// The assembled graph and the tier that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledGraph {
    pub graph: CommunicationGraph,
    pub source: GraphSource,
}

/// Builds the graph for a search request.
pub struct GraphAssembler {
    graph_store: Option<Arc<dyn GraphStore>>,
    config: AssemblerConfig,
}

impl GraphAssembler {
    /// Create an assembler. Without a graph store, tier 1 is skipped.
    pub fn new(graph_store: Option<Arc<dyn GraphStore>>, config: AssemblerConfig) -> Self {
        Self {
            graph_store,
            config,
        }
    }

    pub fn has_graph_store(&self) -> bool {
        self.graph_store.is_some()
    }

    /// Build the graph for `focus` and `results`.
    pub async fn build(
        &self,
        focus: Option<&EntityKey>,
        results: &[SearchResult],
    ) -> AssembledGraph {
        if let Some(graph) = self.from_graph_store(focus).await {
            debug!(nodes = graph.node_count(), "Graph built from graph store");
            return AssembledGraph {
                graph,
                source: GraphSource::GraphStore,
            };
        }

        if let Some(graph) = self.from_results(results) {
            debug!(nodes = graph.node_count(), "Graph built from search results");
            return AssembledGraph {
                graph,
                source: GraphSource::SearchResults,
            };
        }

        debug!("Falling back to demo graph");
        AssembledGraph {
            graph: self.demo(),
            source: GraphSource::Demo,
        }
    }

    /// Tier 1. `None` when there is no focus, no store, the store failed,
    /// or it returned nothing usable.
    async fn from_graph_store(&self, focus: Option<&EntityKey>) -> Option<CommunicationGraph> {
        let store = self.graph_store.as_ref()?;
        let focus = focus.filter(|f| !f.as_str().is_empty())?;

        let neighbors = match store
            .neighbors(focus.as_str(), self.config.neighbor_limit)
            .await
        {
            Ok(neighbors) => neighbors,
            Err(e) => {
                warn!(entity = %focus, error = %e, "Graph store unavailable, skipping tier");
                return None;
            }
        };

        let mut graph = CommunicationGraph::new();
        for row in neighbors.iter().take(self.config.neighbor_limit) {
            graph.set_edge(focus.as_str(), &row.neighbor, row.weight);
        }

        (!graph.is_empty()).then_some(graph)
    }

    /// Tier 2. Each result contributes edges from its sender to at most
    /// `max_recipients_per_result` recipients; repeated pairs add weight.
    fn from_results(&self, results: &[SearchResult]) -> Option<CommunicationGraph> {
        let mut graph = CommunicationGraph::new();

        for result in results {
            let sender = result.sender();
            if !is_participant(sender) {
                continue;
            }
            // The cap applies to the split list before blanks are dropped.
            for recipient in result
                .recipient_list()
                .into_iter()
                .take(self.config.max_recipients_per_result)
            {
                if is_participant(recipient) {
                    graph.record_communication(sender, recipient);
                }
            }
        }

        (!graph.is_empty()).then_some(graph)
    }

    /// Tier 3. Falls back to the built-in edges if the configured ones
    /// yield no nodes.
    fn demo(&self) -> CommunicationGraph {
        let graph = demo_graph(&self.config.demo_edges);
        if graph.is_empty() {
            demo_graph(&default_demo_edges())
        } else {
            graph
        }
    }
}

fn demo_graph(edges: &[DemoEdge]) -> CommunicationGraph {
    CommunicationGraph::from_edges(
        edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.weight)),
    )
}

fn is_participant(value: &str) -> bool {
    !value.is_empty() && value != UNKNOWN
}
