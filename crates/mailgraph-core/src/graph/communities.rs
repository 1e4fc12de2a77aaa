//! Community grouping over sampled `SENT` traffic.
//!
//! Greedy modularity agglomeration: every participant starts alone and the
//! pair of adjacent communities whose merge raises modularity the most is
//! joined, until no merge helps.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::debug;

use crate::traits::SentEdge;

/// Participants that mostly write to each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Community {
    pub members: Vec<String>,
}

impl Community {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Undirected view of the sample. Both directions of a pair share one edge
/// carrying their summed weight. Self-addressed mail and blank ends are
/// dropped.
fn undirected(edges: &[SentEdge]) -> UnGraph<&str, u64> {
    let mut graph = UnGraph::new_undirected();
    let mut index: IndexMap<&str, NodeIndex> = IndexMap::new();

    for edge in edges {
        let (source, target) = (edge.source.trim(), edge.target.trim());
        if source.is_empty() || target.is_empty() || source == target || edge.weight == 0 {
            continue;
        }
        let a = *index.entry(source).or_insert_with(|| graph.add_node(source));
        let b = *index.entry(target).or_insert_with(|| graph.add_node(target));
        match graph.find_edge(a, b) {
            Some(existing) => graph[existing] += edge.weight,
            None => {
                graph.add_edge(a, b, edge.weight);
            }
        }
    }
    graph
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Group the participants of `edges` into communities, largest first.
///
/// Members keep the order in which they first appear in `edges`; equal-size
/// communities are ordered the same way. Deterministic for a given input.
pub fn detect_communities(edges: &[SentEdge]) -> Vec<Community> {
    let graph = undirected(edges);
    let total: u64 = graph.edge_weights().sum();
    if total == 0 {
        return Vec::new();
    }
    let two_m = 2.0 * total as f64;

    let mut members: Vec<Option<Vec<NodeIndex>>> =
        graph.node_indices().map(|n| Some(vec![n])).collect();
    let mut degree: Vec<f64> = graph
        .node_indices()
        .map(|n| graph.edges(n).map(|e| *e.weight() as f64).sum())
        .collect();
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for edge in graph.edge_references() {
        *between
            .entry(ordered(edge.source().index(), edge.target().index()))
            .or_default() += *edge.weight() as f64;
    }

    loop {
        // First pair wins ties.
        let mut best: Option<((usize, usize), f64)> = None;
        for (&(i, j), &weight) in &between {
            let gain = 2.0 * (weight / two_m - degree[i] * degree[j] / (two_m * two_m));
            if best.map_or(true, |(_, g)| gain > g) {
                best = Some(((i, j), gain));
            }
        }
        let Some(((keep, absorb), gain)) = best else {
            break;
        };
        if gain <= 0.0 {
            break;
        }

        between.remove(&(keep, absorb));
        let moved: Vec<((usize, usize), f64)> = between
            .iter()
            .filter(|((a, b), _)| *a == absorb || *b == absorb)
            .map(|(pair, weight)| (*pair, *weight))
            .collect();
        for (pair, weight) in moved {
            between.remove(&pair);
            let other = if pair.0 == absorb { pair.1 } else { pair.0 };
            *between.entry(ordered(keep, other)).or_default() += weight;
        }

        degree[keep] += degree[absorb];
        degree[absorb] = 0.0;
        let absorbed = members[absorb].take().unwrap_or_default();
        if let Some(kept) = members[keep].as_mut() {
            kept.extend(absorbed);
        }
    }

    let mut communities: Vec<Community> = members
        .into_iter()
        .flatten()
        .map(|mut nodes| {
            nodes.sort();
            Community {
                members: nodes.into_iter().map(|n| graph[n].to_string()).collect(),
            }
        })
        .collect();
    communities.sort_by(|a, b| b.size().cmp(&a.size()));

    debug!(
        participants = graph.node_count(),
        communities = communities.len(),
        "Community detection finished"
    );
    communities
}
