//! Topological sorting (Kahn's algorithm) and acyclicity.
//!
//! # Frontier
//!
//! The frontier starts as [`DGraph::sinks`] (nodes without incoming edges).
//! Each step takes one frontier node, appends it to the output and
//! decrements the in-degree of its successors; a successor joins the
//! frontier the moment its in-degree reaches zero. Nodes on a cycle never
//! reach zero, so the output of a cyclic graph is shorter than its node
//! count.
//!
//! # Tie-break
//!
//! Which frontier node comes next is decided by a [`TieBreak`] policy.
//! [`LowestId`] is deterministic and is what [`DGraph::topological_sort`]
//! uses; [`SeededRandom`] reproduces a random pick from an explicit seed.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::graph::DGraph;
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Tie-break policies
// ---------------------------------------------------------------------------

/// Chooses the next node from a non-empty topological-sort frontier.
pub trait TieBreak {
    /// Pick one member of `frontier`.
    ///
    /// Returning `None` or a node outside the frontier falls back to the
    /// lowest identifier.
    fn choose(&mut self, frontier: &BTreeSet<NodeId>) -> Option<NodeId>;
}

/// Always takes the lowest identifier on the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowestId;

impl TieBreak for LowestId {
    fn choose(&mut self, frontier: &BTreeSet<NodeId>) -> Option<NodeId> {
        frontier.first().copied()
    }
}

/// Uniformly random pick, reproducible from a seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TieBreak for SeededRandom {
    fn choose(&mut self, frontier: &BTreeSet<NodeId>) -> Option<NodeId> {
        if frontier.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..frontier.len());
        frontier.iter().nth(pick).copied()
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

impl<N, E> DGraph<N, E> {
    /// Topological order using the [`LowestId`] tie-break.
    ///
    /// Shorter than [`node_count`](Self::node_count) iff the graph has a
    /// cycle (self-loops included).
    #[must_use]
    pub fn topological_sort(&self) -> Vec<NodeId> {
        self.topological_sort_with(&mut LowestId)
    }

    /// Topological order using a caller-supplied tie-break.
    #[instrument(skip(self, policy), fields(nodes = self.node_count()))]
    pub fn topological_sort_with<T: TieBreak + ?Sized>(&self, policy: &mut T) -> Vec<NodeId> {
        let mut in_degree: BTreeMap<NodeId, usize> = self
            .node_ids()
            .map(|id| (id, self.in_degree(id)))
            .collect();
        let mut frontier: BTreeSet<NodeId> = self.sinks().into_iter().collect();
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(&lowest) = frontier.first() {
            let next = policy
                .choose(&frontier)
                .filter(|id| frontier.contains(id))
                .unwrap_or(lowest);
            frontier.remove(&next);
            order.push(next);

            for succ in self.nodes_succ(next) {
                let Some(degree) = in_degree.get_mut(&succ) else {
                    continue;
                };
                if *degree == 0 {
                    continue;
                }
                *degree -= 1;
                if *degree == 0 {
                    frontier.insert(succ);
                }
            }
        }

        debug!(sorted = order.len(), "topological sort");
        order
    }

    /// `true` iff a full topological sort visits every node.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.topological_sort().len() == self.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{IdAllocator, Node};

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

    fn respects_edges(g: &DGraph<usize>, order: &[NodeId]) -> bool {
        let position: BTreeMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        g.edges().all(|edge| position[&edge.from()] < position[&edge.to()])
    }

    #[test]
    fn chain_sorts_in_edge_order() {
        let (g, n) = graph(3, &[(0, 1), (1, 2)]);

        assert_eq!(g.topological_sort(), n);
        assert!(g.is_acyclic());
    }

    #[test]
    fn lowest_id_breaks_ties_deterministically() {
        // 2 -> 0, 1 and 2 are both initial sources.
        let (g, n) = graph(3, &[(2, 0)]);

        assert_eq!(g.topological_sort(), vec![n[1], n[2], n[0]]);
    }

    #[test]
    fn cycle_yields_short_order() {
        let (g, _) = graph(3, &[(0, 1), (1, 2), (2, 0)]);

        assert!(g.topological_sort().len() < 3);
        assert!(!g.is_acyclic());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let (g, n) = graph(2, &[(0, 1), (1, 1)]);

        assert_eq!(g.topological_sort(), vec![n[0]]);
        assert!(!g.is_acyclic());
    }

    #[test]
    fn empty_graph_is_acyclic() {
        let g: DGraph<usize> = DGraph::new();
        assert!(g.topological_sort().is_empty());
        assert!(g.is_acyclic());
    }

    #[test]
    fn seeded_random_is_reproducible_and_valid() {
        let (g, _) = graph(8, &[(0, 4), (1, 4), (2, 5), (3, 5), (4, 6), (5, 7)]);

        let first = g.topological_sort_with(&mut SeededRandom::new(7));
        let second = g.topological_sort_with(&mut SeededRandom::new(7));

        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert!(respects_edges(&g, &first));
    }

    #[test]
    fn misbehaving_policy_falls_back_to_lowest() {
        struct Stranger;
        impl TieBreak for Stranger {
            fn choose(&mut self, _: &BTreeSet<NodeId>) -> Option<NodeId> {
                Some(IdAllocator::starting_at(999).allocate())
            }
        }

        let (g, n) = graph(3, &[(0, 1), (1, 2)]);
        assert_eq!(g.topological_sort_with(&mut Stranger), n);
    }

    #[test]
    fn boxed_policy_is_accepted() {
        let (g, n) = graph(2, &[(0, 1)]);
        let mut policy: Box<dyn TieBreak> = Box::new(LowestId);

        assert_eq!(g.topological_sort_with(policy.as_mut()), n);
    }
}
