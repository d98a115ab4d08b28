//! Reflexive and transitive closures.
//!
//! # Transitive closure
//!
//! For each node `x` (identifier order), a worklist seeded with the current
//! successors of `x` discovers every node reachable from `x`. Each node
//! reached for the first time yields a new edge `x -> z` and contributes its
//! own successors to the worklist. Marks are per source, so the cost is
//! O(n·m + m_closure) where `m_closure` is the edge count of the result.
//!
//! Self-loops are not special: if `x` reaches itself through a cycle, the
//! closure contains `x -> x`.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::graph::DGraph;
use crate::node::NodeId;

impl<N, E> DGraph<N, E> {
    /// Remove every self-loop. Returns the number removed.
    #[instrument(skip(self))]
    pub fn reflexive_reduction(&mut self) -> usize {
        let looped: Vec<NodeId> = self
            .node_ids()
            .filter(|id| self.contains_edge(*id, *id))
            .collect();

        for id in &looped {
            self.remove_edge(*id, *id);
        }

        debug!(removed = looped.len(), "reflexive reduction");
        looped.len()
    }

    /// Add a self-loop to every node lacking one. Returns the number added.
    #[instrument(skip(self))]
    pub fn reflexive_closure(&mut self) -> usize {
        let bare: Vec<NodeId> = self
            .node_ids()
            .filter(|id| !self.contains_edge(*id, *id))
            .collect();

        for id in &bare {
            self.add_edge(*id, *id);
        }

        debug!(added = bare.len(), "reflexive closure");
        bare.len()
    }

    /// Close the edge set under composition in place. Returns the number of
    /// edges added.
    #[instrument(skip(self), fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn transitive_closure(&mut self) -> usize {
        let sources: Vec<NodeId> = self.node_ids().collect();
        let mut added = 0usize;

        for x in sources {
            let mut worklist: Vec<NodeId> = self.nodes_succ(x).collect();
            let mut marked: HashSet<NodeId> = worklist.iter().copied().collect();

            while let Some(y) = worklist.pop() {
                // Snapshot: when y == x the loop below grows the very set.
                let next: Vec<NodeId> = self.nodes_succ(y).collect();
                for z in next {
                    if marked.insert(z) {
                        self.add_edge(x, z);
                        added += 1;
                        worklist.push(z);
                    }
                }
            }

            trace!(node = %x, reach = marked.len(), "closed");
        }

        debug!(added, "transitive closure");
        added
    }
}

#[cfg(test)]
mod tests {
    use crate::edge::Edge;
    use crate::graph::DGraph;
    use crate::node::{IdAllocator, Node, NodeId};

    fn graph(len: usize, edges: &[(usize, usize)]) -> (DGraph<usize>, Vec<NodeId>) {
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
    fn closure_of_chain_adds_shortcut() {
        let (mut g, n) = graph(3, &[(0, 1), (1, 2)]);

        let added = g.transitive_closure();

        assert_eq!(added, 1);
        let keys: Vec<_> = g.edges().map(Edge::key).collect();
        assert_eq!(keys, vec![(n[0], n[1]), (n[0], n[2]), (n[1], n[2])]);
    }

    #[test]
    fn closure_of_cycle_is_complete_with_loops() {
        let (mut g, n) = graph(3, &[(0, 1), (1, 2), (2, 0)]);

        let added = g.transitive_closure();

        assert_eq!(g.edge_count(), 9);
        assert_eq!(added, 6);
        for &id in &n {
            assert!(g.contains_edge(id, id), "cycle member reaches itself");
        }
    }

    #[test]
    fn closure_is_idempotent() {
        let (mut g, _) = graph(5, &[(0, 1), (1, 2), (3, 4), (4, 1)]);

        g.transitive_closure();
        let edges = g.edge_count();

        assert_eq!(g.transitive_closure(), 0);
        assert_eq!(g.edge_count(), edges);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn acyclic_nodes_get_no_self_loop() {
        let (mut g, n) = graph(3, &[(0, 1), (1, 2)]);

        g.transitive_closure();

        assert!(n.iter().all(|&id| !g.contains_edge(id, id)));
    }

    #[test]
    fn reflexive_closure_then_reduction_round_trips() {
        let (mut g, _) = graph(4, &[(0, 1), (2, 3)]);

        assert_eq!(g.reflexive_closure(), 4);
        assert_eq!(g.reflexive_closure(), 0);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.reflexive_reduction(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.reflexive_reduction(), 0);
    }

    #[test]
    fn reflexive_closure_counts_only_missing_loops() {
        let (mut g, n) = graph(3, &[(1, 1)]);

        assert_eq!(g.reflexive_closure(), 2);
        assert!(g.contains_edge(n[0], n[0]));
    }
}
