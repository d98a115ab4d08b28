//! Closure, ordering and traversal algorithms over [`DGraph`].
//!
//! # Overview
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`closure`] | reflexive closure/reduction, transitive closure |
//! | [`order`] | Kahn topological sort with pluggable tie-break, acyclicity |
//! | [`dfs`] | depth-first search with preorder/postorder sequences |
//!
//! Every routine runs to completion. A cycle is reported as data (a short
//! topological order, `is_acyclic() == false`), never as an error.
//!
//! [`DGraph`]: crate::graph::DGraph

pub mod closure;
pub mod dfs;
pub mod order;

pub use dfs::DfsOrder;
pub use order::{LowestId, SeededRandom, TieBreak};
