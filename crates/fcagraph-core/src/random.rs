//! Random graph generation for tests and benchmarks.
//!
//! Nodes carry contents `1..=n`. Every ordered pair, self pairs included,
//! draws an integer in `[0, max_draw]` and keeps the edge iff the draw
//! exceeds `threshold`. With the defaults (10 and 5) an edge is kept with
//! probability 5/11.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::RandomConfig;
use crate::graph::DGraph;
use crate::node::{IdAllocator, NodeId};

/// Generate a random graph on `n` nodes drawing from `rng`.
#[instrument(skip(config, rng, ids))]
pub fn random_graph<R: Rng + ?Sized>(
    n: usize,
    config: &RandomConfig,
    rng: &mut R,
    ids: &mut IdAllocator,
) -> DGraph<usize> {
    let mut graph = DGraph::new();
    let mut order: Vec<NodeId> = Vec::with_capacity(n);
    for content in 1..=n {
        let node = ids.node(content);
        order.push(node.id());
        graph.add_node(node);
    }

    for &from in &order {
        for &to in &order {
            if rng.gen_range(0..=config.max_draw) > config.threshold {
                graph.add_edge(from, to);
            }
        }
    }

    debug!(edges = graph.edge_count(), "random graph generated");
    graph
}

/// Generate a random graph on `n` nodes from `config.seed`.
#[must_use]
pub fn seeded_random_graph(
    n: usize,
    config: &RandomConfig,
    ids: &mut IdAllocator,
) -> DGraph<usize> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    random_graph(n, config, &mut rng, ids)
}
