//! Derived graphs: copies, induced subgraphs, complement and transpose.

use std::collections::{BTreeMap, BTreeSet};

use tracing::instrument;

use super::DGraph;
use crate::edge::Edge;
use crate::node::{IdAllocator, Node, NodeId};

impl<N, E> DGraph<N, E> {
    /// Copy with fresh node identities drawn from `ids`.
    ///
    /// Every edge endpoint is remapped through the old-to-new node
    /// correspondence, so the copy never refers to this graph's nodes.
    #[must_use]
    pub fn duplicate(&self, ids: &mut IdAllocator) -> Self
    where
        N: Clone,
        E: Clone,
    {
        self.duplicate_with_map(ids).0
    }

    /// Like [`duplicate`](Self::duplicate), also returning the old-to-new
    /// identifier map.
    #[must_use]
    pub fn duplicate_with_map(&self, ids: &mut IdAllocator) -> (Self, BTreeMap<NodeId, NodeId>)
    where
        N: Clone,
        E: Clone,
    {
        let mut copy = Self::new();
        let mut mapping = BTreeMap::new();

        for node in self.nodes() {
            let fresh = ids.node(node.content().clone());
            mapping.insert(node.id(), fresh.id());
            copy.add_node(fresh);
        }

        for edge in self.edges() {
            let (Some(from), Some(to)) = (mapping.get(&edge.from()), mapping.get(&edge.to()))
            else {
                continue;
            };
            copy.insert_edge(edge.clone().remapped(*from, *to));
        }

        (copy, mapping)
    }

    /// Subgraph induced by `keep ∩ nodes`. Identities are shared with this
    /// graph; an edge survives iff both endpoints survive.
    #[must_use]
    pub fn subgraph_by_nodes(&self, keep: impl IntoIterator<Item = NodeId>) -> Self
    where
        N: Clone,
        E: Clone,
    {
        let keep: BTreeSet<NodeId> = keep.into_iter().filter(|id| self.contains_node(*id)).collect();

        let mut sub = Self::from_nodes(keep.iter().filter_map(|id| self.node(*id).cloned()));
        for edge in self.edges() {
            if keep.contains(&edge.from()) && keep.contains(&edge.to()) {
                sub.insert_edge(edge.clone());
            }
        }
        sub
    }

    /// Spanning subgraph: every node is kept, an edge is kept iff its
    /// endpoint pair is in `keep` and stored in this graph.
    #[must_use]
    pub fn subgraph_by_edges(&self, keep: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self
    where
        N: Clone,
        E: Clone,
    {
        let mut sub = Self::from_nodes(self.nodes().cloned());
        for (from, to) in keep {
            if let Some(edge) = self.edge(from, to) {
                sub.insert_edge(edge.clone());
            }
        }
        sub
    }

    /// Replace every successor set by its complement over the full node set.
    ///
    /// Self-pairs are complemented like any other pair. New edges carry no
    /// content.
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn complementary(&mut self) {
        let all: Vec<NodeId> = self.node_ids().collect();
        let present: BTreeSet<(NodeId, NodeId)> =
            self.drain_edges().into_iter().map(|edge| edge.key()).collect();

        for &from in &all {
            for &to in &all {
                if !present.contains(&(from, to)) {
                    self.add_edge(from, to);
                }
            }
        }
    }

    /// Reverse every edge in place, carrying content along.
    #[instrument(skip(self), fields(edges = self.edge_count()))]
    pub fn transpose(&mut self) {
        for edge in self.drain_edges() {
            self.insert_edge(edge.reversed());
        }
    }

    /// Transposed copy that keeps node identities.
    #[must_use]
    pub fn transposed(&self) -> Self
    where
        N: Clone,
        E: Clone,
    {
        let mut copy = self.clone();
        copy.transpose();
        copy
    }

    /// Map node contents, keeping identities and edges.
    pub fn map_nodes<M>(&self, mut f: impl FnMut(&Node<N>) -> M) -> DGraph<M, E>
    where
        E: Clone,
    {
        let mut mapped = DGraph::new();
        for node in self.nodes() {
            mapped.add_node(Node::with_id(node.id(), f(node)));
        }
        for edge in self.edges() {
            mapped.insert_edge(edge.clone());
        }
        mapped
    }

    /// Structure-only copy: same identities and edge pairs, no payloads.
    #[must_use]
    pub fn shape(&self) -> DGraph<(), ()> {
        let mut bare = DGraph::from_nodes(self.node_ids().map(|id| Node::with_id(id, ())));
        for edge in self.edges() {
            bare.insert_edge(Edge::new(edge.from(), edge.to()));
        }
        bare
    }
}
