//! Identity-bearing graph nodes and the allocator that names them.
//!
//! # Identity
//!
//! A [`Node`] is identified solely by its [`NodeId`]. Two nodes with equal
//! content but different identifiers are distinct; content is a mutable
//! payload and never participates in equality, hashing, or ordering.
//!
//! # Allocation
//!
//! Identifiers come from an explicit [`IdAllocator`] rather than a process
//! global counter. Every operation that mints fresh nodes (copying a graph,
//! building a condensation, generating a random graph) takes the allocator
//! as a parameter, so identifier assignment is deterministic per allocator.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Opaque, totally ordered node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw integer value of this identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// IdAllocator
// ---------------------------------------------------------------------------

/// Monotonic source of [`NodeId`]s.
///
/// Identifiers handed out by one allocator are strictly increasing and never
/// reused. Graphs that will be combined or compared must share an allocator.
///
/// Starting points are capped at [`IdAllocator::MAX_FIRST`], which leaves
/// at least 2^63 identifiers before the counter could run out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Largest accepted starting identifier.
    pub const MAX_FIRST: u64 = u64::MAX >> 1;

    /// Create an allocator whose first identifier is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Create an allocator whose first identifier is `first`, clamped to
    /// [`MAX_FIRST`](Self::MAX_FIRST).
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        let next = if first > Self::MAX_FIRST {
            Self::MAX_FIRST
        } else {
            first
        };
        Self { next }
    }

    /// Hand out the next identifier.
    pub const fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        // Unreachable from a clamped start: 2^63 allocations would be needed.
        self.next = match self.next.checked_add(1) {
            Some(next) => next,
            None => u64::MAX,
        };
        id
    }

    /// Identifier the next call to [`allocate`](Self::allocate) will return.
    #[must_use]
    pub const fn peek(&self) -> NodeId {
        NodeId(self.next)
    }

    /// Build a node with a freshly allocated identifier.
    pub const fn node<N>(&mut self, content: N) -> Node<N> {
        Node::with_id(self.allocate(), content)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A graph vertex carrying an opaque content payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<N> {
    id: NodeId,
    content: N,
}

impl<N> Node<N> {
    /// Node with an identifier that was allocated elsewhere.
    pub(crate) const fn with_id(id: NodeId, content: N) -> Self {
        Self { id, content }
    }

    /// Identifier of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn content(&self) -> &N {
        &self.content
    }

    pub const fn content_mut(&mut self) -> &mut N {
        &mut self.content
    }

    /// Replace the content, returning the previous payload.
    pub fn set_content(&mut self, content: N) -> N {
        std::mem::replace(&mut self.content, content)
    }

    #[must_use]
    pub fn into_content(self) -> N {
        self.content
    }
}

impl<N> PartialEq for Node<N> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<N> Eq for Node<N> {}

impl<N> PartialOrd for Node<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Node<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<N> Hash for Node<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<N: fmt::Display> fmt::Display for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.content.fmt(f)
    }
}
