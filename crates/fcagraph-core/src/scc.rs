//! Strongly connected components and the condensation DAG (Kosaraju).
//!
//! # Algorithm
//!
//! 1. Take a structure-only working copy `T` of the graph, close it
//!    transitively and record the postorder of a whole-graph DFS on `T`.
//! 2. Transpose the *original* (non-closed) structure into `T'`.
//! 3. Reverse the postorder to obtain the processing order.
//! 4. For each unprocessed node in that order, a single-source DFS on `T'`
//!    that follows the processing order yields, as its postorder, exactly
//!    one SCC. The SCC becomes a fresh node whose content is the set of
//!    original nodes.
//! 5. `A -> B` is a condensation edge iff some member of `A` reaches some
//!    member of `B` in `T`. Since `T` is closed, that is one pass over the
//!    edges of `T`.
//! 6. Self-loops are dropped: every SCC reaches itself.
//!
//! Two distinct SCCs can never reach each other both ways, so the result is
//! acyclic by construction.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::algo::dfs::rank_of;
use crate::dag::{Component, DAGraph};
use crate::graph::DGraph;
use crate::node::{IdAllocator, NodeId};

impl<N: Clone, E> DGraph<N, E> {
    /// Condense every strongly connected component into a single node.
    ///
    /// Condensation nodes get fresh identifiers from `ids`, in discovery
    /// order. Each carries the set of original nodes it collapses.
    #[must_use]
    #[instrument(skip(self, ids), fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn strongly_connected_components(&self, ids: &mut IdAllocator) -> DAGraph<N> {
        let mut closed = self.shape();
        closed.transitive_closure();
        let finished = closed.depth_first_search().last;

        let transposed = self.shape().transposed();

        let processing: Vec<NodeId> = finished.into_iter().rev().collect();
        let rank = rank_of(&processing);

        let mut condensation: DGraph<Component<N>, ()> = DGraph::new();
        let mut component_of: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        let mut visited = BTreeSet::new();

        for &root in &processing {
            if visited.contains(&root) {
                continue;
            }
            let members = transposed.ranked_search(root, &mut visited, Some(&rank)).last;
            let component: Component<N> = members
                .iter()
                .filter_map(|id| self.node(*id).cloned())
                .collect();

            let scc = ids.node(component);
            for member in members {
                component_of.insert(member, scc.id());
            }
            condensation.add_node(scc);
        }

        for edge in closed.edges() {
            if let (Some(&from), Some(&to)) =
                (component_of.get(&edge.from()), component_of.get(&edge.to()))
            {
                condensation.add_edge(from, to);
            }
        }
        condensation.reflexive_reduction();

        debug!(
            components = condensation.node_count(),
            edges = condensation.edge_count(),
            "condensation built"
        );
        DAGraph::from_parts(condensation, component_of)
    }
}
