//! Directed edges between nodes.
//!
//! An [`Edge`] is identified by its ordered endpoint pair `(from, to)`.
//! Content is optional and is not part of identity: re-adding an edge for
//! an existing pair overwrites the stored content instead of creating a
//! parallel edge.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::node::NodeId;

/// A directed relation `from -> to` with an optional payload.
#[derive(Debug, Clone)]
pub struct Edge<E> {
    from: NodeId,
    to: NodeId,
    content: Option<E>,
}

impl<E> Edge<E> {
    /// Edge without content.
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            content: None,
        }
    }

    #[must_use]
    pub const fn with_content(from: NodeId, to: NodeId, content: E) -> Self {
        Self {
            from,
            to,
            content: Some(content),
        }
    }

    #[must_use]
    pub const fn from(&self) -> NodeId {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> NodeId {
        self.to
    }

    /// The `(from, to)` pair that identifies this edge.
    #[must_use]
    pub const fn key(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    #[must_use]
    pub const fn content(&self) -> Option<&E> {
        self.content.as_ref()
    }

    pub const fn content_mut(&mut self) -> Option<&mut E> {
        self.content.as_mut()
    }

    /// `true` iff a payload is present.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Replace the payload, returning the previous one.
    pub fn set_content(&mut self, content: Option<E>) -> Option<E> {
        std::mem::replace(&mut self.content, content)
    }

    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Same edge with its endpoints swapped; content moves along.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            content: self.content,
        }
    }

    /// Remap both endpoints, keeping the content.
    #[must_use]
    pub(crate) fn remapped(self, from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            content: self.content,
        }
    }

    #[must_use]
    pub fn into_content(self) -> Option<E> {
        self.content
    }
}

impl<E> PartialEq for Edge<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<E> Eq for Edge<E> {}

impl<E> PartialOrd for Edge<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Edge<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<E> Hash for Edge<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<E: fmt::Display> fmt::Display for Edge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Some(content) => write!(f, "{}->{} [{content}]", self.from, self.to),
            None => write!(f, "{}->{}", self.from, self.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::node::IdAllocator;

    #[test]
    fn identity_ignores_content() {
        let mut ids = IdAllocator::new();
        let (a, b) = (ids.allocate(), ids.allocate());

        let bare: Edge<&str> = Edge::new(a, b);
        let labelled = Edge::with_content(a, b, "label");

        assert_eq!(bare, labelled);
        assert!(!bare.has_content());
        assert!(labelled.has_content());
    }

    #[test]
    fn ordering_is_lexicographic_on_endpoints() {
        let mut ids = IdAllocator::new();
        let (a, b, c) = (ids.allocate(), ids.allocate(), ids.allocate());

        let edges: BTreeSet<Edge<()>> = [Edge::new(b, a), Edge::new(a, c), Edge::new(a, b)]
            .into_iter()
            .collect();
        let keys: Vec<_> = edges.iter().map(Edge::key).collect();

        assert_eq!(keys, vec![(a, b), (a, c), (b, a)]);
    }

    #[test]
    fn reversed_carries_content() {
        let mut ids = IdAllocator::new();
        let (a, b) = (ids.allocate(), ids.allocate());

        let edge = Edge::with_content(a, b, 7).reversed();

        assert_eq!(edge.key(), (b, a));
        assert_eq!(edge.content(), Some(&7));
    }

    #[test]
    fn display_shows_content_when_present() {
        let mut ids = IdAllocator::new();
        let (a, b) = (ids.allocate(), ids.allocate());

        assert_eq!(Edge::<u8>::new(a, b).to_string(), "1->2");
        assert_eq!(Edge::with_content(a, b, "x").to_string(), "1->2 [x]");
    }

    #[test]
    fn loop_means_equal_endpoints() {
        let mut ids = IdAllocator::starting_at(IdAllocator::MAX_FIRST);
        let (a, b) = (ids.allocate(), ids.allocate());

        assert!(Edge::<()>::new(a, a).is_loop());
        assert!(Edge::with_content(b, b, "self").is_loop());
        assert!(!Edge::<()>::new(a, b).is_loop());
    }
}
