#![forbid(unsafe_code)]
//! fcagraph-core: the directed-graph engine behind the fcagraph
//! formal-concept-analysis toolkit.
//!
//! # Layout
//!
//! ```text
//! node / edge        identity-bearing vertices and (from, to) edges
//!        ↓
//! graph::DGraph      node set + successor/predecessor adjacency
//!        ↓
//! algo               closures, topological sort, depth-first search
//!        ↓
//! scc → dag::DAGraph strongly connected components, condensation DAG
//! ```
//!
//! # Conventions
//!
//! - **Failures**: graph primitives return `bool`/`Option`; nothing in the
//!   graph API panics or errors on bad input. Configuration loading uses
//!   `anyhow::Result`.
//! - **Identity**: node identifiers come from an explicit
//!   [`IdAllocator`]; there is no global counter.
//! - **Logging**: `tracing` spans and events (`debug!`, `trace!`). No
//!   subscriber is installed here.
//!
//! # Example
//!
//! ```
//! use fcagraph_core::{DGraph, IdAllocator};
//!
//! let mut ids = IdAllocator::new();
//! let (a, b, c) = (ids.node("a"), ids.node("b"), ids.node("c"));
//! let (ia, ib, ic) = (a.id(), b.id(), c.id());
//!
//! let mut graph: DGraph<&str> = DGraph::from_nodes([a, b, c]);
//! graph.add_edge(ia, ib);
//! graph.add_edge(ib, ic);
//! graph.add_edge(ic, ia);
//!
//! let dag = graph.strongly_connected_components(&mut ids);
//! assert_eq!(dag.node_count(), 1);
//! assert!(dag.is_acyclic());
//! ```

pub mod algo;
pub mod config;
pub mod dag;
pub mod edge;
pub mod graph;
pub mod node;
pub mod random;
mod scc;
pub mod stats;

pub use algo::{DfsOrder, LowestId, SeededRandom, TieBreak};
pub use config::{EngineConfig, RandomConfig, SortConfig, TieBreakKind, load_config};
pub use dag::{Component, DAGraph};
pub use edge::Edge;
pub use graph::DGraph;
pub use node::{IdAllocator, Node, NodeId};
pub use random::{random_graph, seeded_random_graph};
pub use stats::GraphStats;
