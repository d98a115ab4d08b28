//! The condensation DAG and its order operations.
//!
//! # Overview
//!
//! [`DAGraph`] is produced by [`DGraph::strongly_connected_components`].
//! Each of its nodes holds one strongly connected component of the source
//! graph as a set of the original nodes. It dereferences to a read-only
//! [`DGraph`]; the generic mutation API is not reachable through it, so
//! acyclicity cannot be broken after construction.
//!
//! Viewed as an order, an edge `a -> b` reads "`a` is below `b`":
//! minimal nodes have no predecessors, maximal nodes have no successors,
//! majorants are everything reachable forward and minorants everything
//! reachable backward.
//!
//! # Transitive reduction
//!
//! [`DAGraph::transitive_reduction`] keeps only the covering edges (the
//! Hasse diagram). Nodes are processed in reverse topological order so that
//! every successor's reachable set is complete when a node is handled; an
//! edge `u -> v` is dropped when `v` is reachable from another successor of
//! `u`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::Deref;

use tracing::{debug, instrument};

use crate::graph::DGraph;
use crate::node::{Node, NodeId};

/// Members of one strongly connected component.
pub type Component<N> = BTreeSet<Node<N>>;

/// An acyclic graph of strongly connected components.
#[derive(Debug, Clone)]
pub struct DAGraph<N> {
    graph: DGraph<Component<N>, ()>,
    /// Original node id -> condensation node id.
    component_of: BTreeMap<NodeId, NodeId>,
}

impl<N> Deref for DAGraph<N> {
    type Target = DGraph<Component<N>, ()>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<N> DAGraph<N> {
    pub(crate) const fn from_parts(
        graph: DGraph<Component<N>, ()>,
        component_of: BTreeMap<NodeId, NodeId>,
    ) -> Self {
        Self {
            graph,
            component_of,
        }
    }

    /// Release the underlying graph, giving up the acyclicity guarantee.
    #[must_use]
    pub fn into_inner(self) -> DGraph<Component<N>, ()> {
        self.graph
    }

    /// Condensation node holding the original node `original`.
    #[must_use]
    pub fn component_of(&self, original: NodeId) -> Option<&Node<Component<N>>> {
        self.graph.node(*self.component_of.get(&original)?)
    }

    /// Number of components with more than one member.
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.graph
            .nodes()
            .filter(|scc| scc.content().len() > 1)
            .count()
    }

    /// Nodes with no predecessor.
    #[must_use]
    pub fn minimal_nodes(&self) -> Vec<NodeId> {
        self.graph.sinks()
    }

    /// Nodes with no successor.
    #[must_use]
    pub fn maximal_nodes(&self) -> Vec<NodeId> {
        self.graph.wells()
    }

    /// Every node strictly reachable from `id` along edges.
    #[must_use]
    pub fn majorants(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.reach(id, |node| self.graph.nodes_succ(node).collect())
    }

    /// Every node from which `id` is strictly reachable.
    #[must_use]
    pub fn minorants(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.reach(id, |node| self.graph.nodes_pred(node).collect())
    }

    /// Sub-DAG induced by `id` and its majorants.
    #[must_use]
    pub fn filter(&self, id: NodeId) -> Self
    where
        N: Clone,
    {
        let mut keep = self.majorants(id);
        self.restricted(id, &mut keep)
    }

    /// Sub-DAG induced by `id` and its minorants.
    #[must_use]
    pub fn ideal(&self, id: NodeId) -> Self
    where
        N: Clone,
    {
        let mut keep = self.minorants(id);
        self.restricted(id, &mut keep)
    }

    /// Reduce to covering edges. Returns the number of edges removed.
    #[instrument(skip(self), fields(edges = self.graph.edge_count()))]
    pub fn transitive_reduction(&mut self) -> usize {
        let topo = self.graph.topological_sort();
        let mut reachable: HashMap<NodeId, HashSet<NodeId>> = HashMap::with_capacity(topo.len());

        for &u in topo.iter().rev() {
            let mut reach_u: HashSet<NodeId> = HashSet::new();
            for v in self.graph.nodes_succ(u) {
                reach_u.insert(v);
                if let Some(rv) = reachable.get(&v) {
                    reach_u.extend(rv.iter().copied());
                }
            }
            reachable.insert(u, reach_u);
        }

        // Collect first: removal rewrites the adjacency being inspected.
        let redundant: Vec<(NodeId, NodeId)> = self
            .graph
            .edges()
            .filter(|edge| {
                let (u, v) = edge.key();
                self.graph
                    .nodes_succ(u)
                    .filter(|&w| w != v)
                    .any(|w| reachable.get(&w).is_some_and(|rw| rw.contains(&v)))
            })
            .map(|edge| edge.key())
            .collect();

        for (from, to) in &redundant {
            self.graph.remove_edge(*from, *to);
        }

        debug!(removed = redundant.len(), "transitive reduction");
        redundant.len()
    }

    fn reach(&self, start: NodeId, step: impl Fn(NodeId) -> Vec<NodeId>) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        if !self.graph.contains_node(start) {
            return seen;
        }
        let mut stack = step(start);
        while let Some(node) = stack.pop() {
            if seen.insert(node) {
                stack.extend(step(node));
            }
        }
        seen
    }

    fn restricted(&self, id: NodeId, keep: &mut BTreeSet<NodeId>) -> Self
    where
        N: Clone,
    {
        if self.graph.contains_node(id) {
            keep.insert(id);
        }
        let graph = self.graph.subgraph_by_nodes(keep.iter().copied());
        let component_of = self
            .component_of
            .iter()
            .filter(|(_, scc)| keep.contains(*scc))
            .map(|(original, scc)| (*original, *scc))
            .collect();
        Self::from_parts(graph, component_of)
    }
}
