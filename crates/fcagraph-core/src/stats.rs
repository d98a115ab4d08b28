//! Summary statistics and structural fingerprints.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: sizes of the graph.
//! - **density**: `edge_count / node_count²`. Self-loops are legitimate
//!   edges here, so every ordered pair counts. Zero for an empty graph.
//! - **self_loop_count**: edges `x -> x`.
//! - **source_count**: nodes without incoming edges ([`DGraph::sinks`]).
//! - **well_count**: nodes without outgoing edges ([`DGraph::wells`]).
//! - **acyclic**: whether a topological sort covers every node.
//! - **scc_count** / **cycle_count**: number of strongly connected
//!   components, and how many of them have more than one member.
//!
//! # Fingerprint
//!
//! [`DGraph::fingerprint`] is a BLAKE3 hash of the node identifiers and the
//! ordered edge list. It changes only when structure changes, so writers
//! can skip re-serializing an unchanged graph.

use serde::{Deserialize, Serialize};

use crate::graph::DGraph;
use crate::node::IdAllocator;

/// Summary statistics for a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub self_loop_count: usize,
    pub source_count: usize,
    pub well_count: usize,
    pub acyclic: bool,
    pub scc_count: usize,
    pub cycle_count: usize,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute<N, E>(graph: &DGraph<N, E>) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let density = if node_count == 0 {
            0.0
        } else {
            edge_count as f64 / (node_count * node_count) as f64
        };

        // Component ids are throwaway: only the counts leave this function.
        let condensation = graph
            .shape()
            .strongly_connected_components(&mut IdAllocator::new());

        Self {
            node_count,
            edge_count,
            density,
            self_loop_count: graph.edges().filter(|edge| edge.is_loop()).count(),
            source_count: graph.sinks().len(),
            well_count: graph.wells().len(),
            acyclic: graph.is_acyclic(),
            scc_count: condensation.node_count(),
            cycle_count: condensation.cycle_count(),
        }
    }
}

impl<N, E> DGraph<N, E> {
    /// BLAKE3 hash of the structure, formatted `blake3:<hex>`.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"nodes");
        for id in self.node_ids() {
            hasher.update(&id.get().to_le_bytes());
        }
        hasher.update(b"edges");
        for edge in self.edges() {
            hasher.update(&edge.from().get().to_le_bytes());
            hasher.update(&edge.to().get().to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeId};

    fn graph(len: usize, edges: &[(usize, usize)]) -> (DGraph<usize, String>, Vec<NodeId>) {
        let mut ids = IdAllocator::new();
        let nodes: Vec<Node<usize>> = (0..len).map(|i| ids.node(i)).collect();
        let n: Vec<NodeId> = nodes.iter().map(Node::id).collect();
        let mut g = DGraph::from_nodes(nodes);
        for &(a, b) in edges {
            assert!(g.add_edge(n[a], n[b]));
        }
        (g, n)
    }

    #[test]
    fn empty_graph_stats() {
        let (g, _) = graph(0, &[]);
        let stats = GraphStats::compute(&g);

        assert_eq!(stats.node_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert!(stats.acyclic);
        assert_eq!(stats.scc_count, 0);
    }

    #[test]
    fn cycle_with_tail_stats() {
        let (g, _) = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 3)]);
        let stats = GraphStats::compute(&g);

        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.self_loop_count, 1);
        assert_eq!(stats.source_count, 0);
        assert_eq!(stats.well_count, 0);
        assert!(!stats.acyclic);
        assert_eq!(stats.scc_count, 2);
        assert_eq!(stats.cycle_count, 1);
        assert!((stats.density - 5.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn fingerprint_ignores_content_but_not_structure() {
        let (mut g, n) = graph(3, &[(0, 1)]);
        let before = g.fingerprint();

        assert!(g.add_edge_with_content(n[0], n[1], "label".to_string()));
        assert_eq!(g.fingerprint(), before);

        assert!(g.add_edge(n[1], n[2]));
        assert_ne!(g.fingerprint(), before);
        assert!(before.starts_with("blake3:"));
    }
}
