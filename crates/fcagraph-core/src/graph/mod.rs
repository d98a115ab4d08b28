//! The mutable directed graph container.
//!
//! # Overview
//!
//! [`DGraph`] stores a node set plus two adjacency maps. Every public
//! operation preserves four invariants:
//!
//! 1. the node set equals the key set of both adjacency maps;
//! 2. `a -> b` is in `successors[a]` iff `a` is in `predecessors[b]`;
//! 3. every edge endpoint is a member of the node set;
//! 4. no two stored edges share the same `(from, to)` pair.
//!
//! Edge payloads live once, in the successor map. The predecessor map only
//! records which sources point at a node; predecessor edges are resolved
//! through the successor map.
//!
//! ## Failure reporting
//!
//! Mutations report success as `bool` and leave the graph untouched on
//! failure (duplicate node, missing endpoint, absent edge). Lookups return
//! `Option`. None of these outcomes are errors.
//!
//! ## Determinism
//!
//! Nodes iterate in identifier order and edges iterate grouped by source in
//! `(from, to)` order, so serialized output is reproducible.

mod derive;

use std::collections::{BTreeMap, BTreeSet};

use crate::edge::Edge;
use crate::node::{Node, NodeId};

// ---------------------------------------------------------------------------
// DGraph
// ---------------------------------------------------------------------------

/// A directed graph with node payloads `N` and optional edge payloads `E`.
///
/// `Clone` produces a value copy that keeps node identities. Use
/// [`DGraph::duplicate`] for a copy with fresh identities.
#[derive(Debug, Clone)]
pub struct DGraph<N, E = ()> {
    nodes: BTreeMap<NodeId, Node<N>>,
    successors: BTreeMap<NodeId, BTreeMap<NodeId, Edge<E>>>,
    predecessors: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl<N, E> Default for DGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DGraph<N, E> {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Create an edgeless graph over `nodes`. Duplicates are ignored.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node<N>>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    // -- nodes --------------------------------------------------------------

    /// Insert `node` with empty adjacency. Returns `false` if already present.
    pub fn add_node(&mut self, node: Node<N>) -> bool {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        self.successors.insert(id, BTreeMap::new());
        self.predecessors.insert(id, BTreeSet::new());
        true
    }

    /// Remove `id` and every edge touching it. Returns `false` if absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }

        // Snapshot both incidence lists before touching the maps: a self-loop
        // appears in each and removal rewrites the sets being walked.
        let outgoing: Vec<NodeId> = self
            .successors
            .get(&id)
            .map(|targets| targets.keys().copied().collect())
            .unwrap_or_default();
        let incoming: Vec<NodeId> = self
            .predecessors
            .get(&id)
            .map(|sources| sources.iter().copied().collect())
            .unwrap_or_default();

        for to in outgoing {
            self.remove_edge(id, to);
        }
        for from in incoming {
            self.remove_edge(from, id);
        }

        self.successors.remove(&id);
        self.predecessors.remove(&id);
        self.nodes.remove(&id);
        true
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.nodes.values()
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes.keys().copied()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<N>> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<N>> {
        self.nodes.get_mut(&id)
    }

    /// First node (in identifier order) whose raw identifier is `ident`.
    #[must_use]
    pub fn node_by_ident(&self, ident: u64) -> Option<&Node<N>> {
        self.nodes.values().find(|node| node.id().get() == ident)
    }

    /// First node (in identifier order) whose content equals `content`.
    #[must_use]
    pub fn node_by_content(&self, content: &N) -> Option<&Node<N>>
    where
        N: PartialEq,
    {
        self.nodes.values().find(|node| node.content() == content)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- edges --------------------------------------------------------------

    /// Add `from -> to` without content.
    ///
    /// Returns `false` unless both endpoints are members. Re-adding an
    /// existing pair clears its content.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        self.insert_edge(Edge::new(from, to))
    }

    /// Add `from -> to` carrying `content`, overwriting any previous payload.
    pub fn add_edge_with_content(&mut self, from: NodeId, to: NodeId, content: E) -> bool {
        self.insert_edge(Edge::with_content(from, to, content))
    }

    /// Store `edge`, replacing any edge with the same endpoint pair.
    pub fn insert_edge(&mut self, edge: Edge<E>) -> bool {
        let (from, to) = edge.key();
        if !self.contains_node(from) || !self.contains_node(to) {
            return false;
        }
        let (Some(targets), Some(sources)) =
            (self.successors.get_mut(&from), self.predecessors.get_mut(&to))
        else {
            return false;
        };
        targets.insert(to, edge);
        sources.insert(from);
        true
    }

    /// Remove `from -> to`. Returns `false` if no such edge is stored.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        self.take_edge(from, to).is_some()
    }

    /// Remove the edge sharing `edge`'s endpoint pair.
    pub fn remove_edge_value(&mut self, edge: &Edge<E>) -> bool {
        self.remove_edge(edge.from(), edge.to())
    }

    /// Remove `from -> to` and hand back the stored edge.
    pub fn take_edge(&mut self, from: NodeId, to: NodeId) -> Option<Edge<E>> {
        let edge = self.successors.get_mut(&from)?.remove(&to)?;
        if let Some(sources) = self.predecessors.get_mut(&to) {
            sources.remove(&from);
        }
        Some(edge)
    }

    /// `true` iff both endpoints are members and `from -> to` is recorded in
    /// both adjacency maps.
    #[must_use]
    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.contains_node(from)
            && self.contains_node(to)
            && self
                .successors
                .get(&from)
                .is_some_and(|targets| targets.contains_key(&to))
            && self
                .predecessors
                .get(&to)
                .is_some_and(|sources| sources.contains(&from))
    }

    #[must_use]
    pub fn contains_edge_value(&self, edge: &Edge<E>) -> bool {
        self.contains_edge(edge.from(), edge.to())
    }

    #[must_use]
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge<E>> {
        self.successors.get(&from)?.get(&to)
    }

    pub fn edge_mut(&mut self, from: NodeId, to: NodeId) -> Option<&mut Edge<E>> {
        self.successors.get_mut(&from)?.get_mut(&to)
    }

    /// All edges, grouped by source in `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.successors.values().flat_map(BTreeMap::values)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeMap::len).sum()
    }

    /// Outgoing edges of `id` in target order. Empty for unknown nodes.
    pub fn edges_succ(&self, id: NodeId) -> impl Iterator<Item = &Edge<E>> {
        self.successors.get(&id).into_iter().flat_map(BTreeMap::values)
    }

    /// Incoming edges of `id` in source order. Empty for unknown nodes.
    pub fn edges_pred(&self, id: NodeId) -> impl Iterator<Item = &Edge<E>> {
        self.predecessors
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(move |from| self.edge(*from, id))
    }

    /// Direct successors of `id` in identifier order.
    pub fn nodes_succ(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        self.successors.get(&id).into_iter().flat_map(|targets| targets.keys().copied())
    }

    /// Direct predecessors of `id` in identifier order.
    pub fn nodes_pred(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        self.predecessors.get(&id).into_iter().flatten().copied()
    }

    #[must_use]
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.successors.get(&id).map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.predecessors.get(&id).map_or(0, BTreeSet::len)
    }

    // -- sources and wells --------------------------------------------------

    /// Nodes without incoming edges.
    ///
    /// The name is kept from the lattice toolkit this engine serves: these
    /// are graph *sources*. Topological sorting seeds its frontier here.
    #[must_use]
    pub fn sinks(&self) -> Vec<NodeId> {
        self.predecessors
            .iter()
            .filter(|(_, sources)| sources.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Nodes without outgoing edges.
    #[must_use]
    pub fn wells(&self) -> Vec<NodeId> {
        self.successors
            .iter()
            .filter(|(_, targets)| targets.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    // -- internal -----------------------------------------------------------

    /// Drop every edge, keeping the node set. Returns the removed edges in
    /// `(from, to)` order.
    pub(crate) fn drain_edges(&mut self) -> Vec<Edge<E>> {
        let mut drained = Vec::with_capacity(self.edge_count());
        for targets in self.successors.values_mut() {
            drained.extend(std::mem::take(targets).into_values());
        }
        for sources in self.predecessors.values_mut() {
            sources.clear();
        }
        drained
    }

    /// Verify the structural invariants. Returns a description of the first
    /// violation found.
    ///
    /// A test and debugging aid: every public mutation already keeps the
    /// invariants, so a healthy graph always passes.
    ///
    /// # Errors
    ///
    /// Returns the violated invariant as a message.
    pub fn check_invariants(&self) -> Result<(), String> {
        let node_keys: Vec<&NodeId> = self.nodes.keys().collect();
        if node_keys != self.successors.keys().collect::<Vec<_>>() {
            return Err("successor keys differ from node set".to_string());
        }
        if node_keys != self.predecessors.keys().collect::<Vec<_>>() {
            return Err("predecessor keys differ from node set".to_string());
        }

        for (from, targets) in &self.successors {
            for (to, edge) in targets {
                if edge.key() != (*from, *to) {
                    return Err(format!("edge {from}->{to} stored under wrong key"));
                }
                if !self.nodes.contains_key(to) {
                    return Err(format!("edge {from}->{to} targets unknown node"));
                }
                if !self.predecessors.get(to).is_some_and(|s| s.contains(from)) {
                    return Err(format!("edge {from}->{to} missing from predecessors"));
                }
            }
        }

        for (to, sources) in &self.predecessors {
            for from in sources {
                if !self.successors.get(from).is_some_and(|t| t.contains_key(to)) {
                    return Err(format!("predecessor {from}->{to} missing from successors"));
                }
            }
        }

        Ok(())
    }
}
