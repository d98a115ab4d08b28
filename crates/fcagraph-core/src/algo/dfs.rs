//! Depth-first search with preorder ("first") and postorder ("last")
//! sequences.
//!
//! Traversal uses an explicit stack of `(node, candidates, cursor)` frames
//! instead of call recursion, so depth is bounded by memory rather than the
//! thread stack. A node is recorded in `first` when it is entered and in
//! `last` once all of its candidates are exhausted; the source is therefore
//! the final entry of `last`.
//!
//! # Candidate order
//!
//! Without an explicit ordering, successors are tried in identifier order.
//! With one, successors are tried in their relative position in that
//! ordering and successors absent from it are skipped.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::graph::DGraph;
use crate::node::NodeId;

/// Entry and exit sequences of a depth-first traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsOrder {
    /// Nodes in the order they were first entered (preorder).
    pub first: Vec<NodeId>,
    /// Nodes in the order they were finished (postorder).
    pub last: Vec<NodeId>,
}

impl DfsOrder {
    fn append(&mut self, other: Self) {
        self.first.extend(other.first);
        self.last.extend(other.last);
    }
}

/// Position of each node in an explicit visiting order.
pub(crate) type Rank = HashMap<NodeId, usize>;

pub(crate) fn rank_of(order: &[NodeId]) -> Rank {
    let mut rank = Rank::with_capacity(order.len());
    for (position, id) in order.iter().enumerate() {
        rank.entry(*id).or_insert(position);
    }
    rank
}

impl<N, E> DGraph<N, E> {
    /// Depth-first search from `source`, marking entered nodes in `visited`.
    ///
    /// `source` is entered even if already marked. Nodes already in
    /// `visited` are never entered again, which lets callers chain several
    /// searches over one visited set. An unknown `source` yields empty
    /// sequences.
    pub fn depth_first_search_from(
        &self,
        source: NodeId,
        visited: &mut BTreeSet<NodeId>,
        order: Option<&[NodeId]>,
    ) -> DfsOrder {
        let rank = order.map(rank_of);
        self.ranked_search(source, visited, rank.as_ref())
    }

    /// Depth-first search over the whole graph: every still-unvisited node,
    /// in identifier order, roots a new search. Sequences are concatenated.
    #[must_use]
    #[instrument(skip(self), fields(nodes = self.node_count()))]
    pub fn depth_first_search(&self) -> DfsOrder {
        let mut visited = BTreeSet::new();
        let mut result = DfsOrder::default();

        for id in self.node_ids() {
            if !visited.contains(&id) {
                result.append(self.ranked_search(id, &mut visited, None));
            }
        }

        result
    }

    pub(crate) fn ranked_search(
        &self,
        source: NodeId,
        visited: &mut BTreeSet<NodeId>,
        rank: Option<&Rank>,
    ) -> DfsOrder {
        let mut result = DfsOrder::default();
        if !self.contains_node(source) {
            return result;
        }

        visited.insert(source);
        result.first.push(source);
        let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> =
            vec![(source, self.candidates(source, rank), 0)];

        while let Some(frame) = stack.last_mut() {
            let (current, candidates, cursor) = frame;

            if let Some(&next) = candidates.get(*cursor) {
                *cursor += 1;
                if visited.insert(next) {
                    result.first.push(next);
                    let next_candidates = self.candidates(next, rank);
                    stack.push((next, next_candidates, 0));
                }
            } else {
                result.last.push(*current);
                stack.pop();
            }
        }

        result
    }

    fn candidates(&self, id: NodeId, rank: Option<&Rank>) -> Vec<NodeId> {
        match rank {
            None => self.nodes_succ(id).collect(),
            Some(rank) => {
                let mut ranked: Vec<(usize, NodeId)> = self
                    .nodes_succ(id)
                    .filter_map(|succ| rank.get(&succ).map(|r| (*r, succ)))
                    .collect();
                ranked.sort_unstable();
                ranked.into_iter().map(|(_, succ)| succ).collect()
            }
        }
    }
}
