//! Graphviz DOT output.
//!
//! ```text
//! digraph G {
//! Graph [rankdir=BT]
//! 1 [label="a"]
//! 2 [label="b"]
//! 1->2 [label="covers"]
//! 2->1
//! }
//! ```
//!
//! Nodes are named by identifier and labelled with their content. Edges
//! carry a label only when they have content. Double quotes and
//! backslashes inside labels are escaped.

use std::fmt::Display;
use std::io::Write;

use fcagraph_core::DGraph;

use crate::error::WriteError;
use crate::registry::GraphWriter;

/// Writes graphs as Graphviz `digraph`s, bottom-to-top.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotWriter;

impl DotWriter {
    /// Format tag this writer is registered under by default.
    pub const FORMAT: &'static str = "dot";
}

impl<N: Display, E: Display> GraphWriter<N, E> for DotWriter {
    fn write(&self, graph: &DGraph<N, E>, out: &mut dyn Write) -> Result<(), WriteError> {
        writeln!(out, "digraph G {{")?;
        writeln!(out, "Graph [rankdir=BT]")?;

        for node in graph.nodes() {
            writeln!(out, "{} [label=\"{}\"]", node.id(), escape(node.content()))?;
        }

        for edge in graph.edges() {
            match edge.content() {
                Some(content) => writeln!(
                    out,
                    "{}->{} [label=\"{}\"]",
                    edge.from(),
                    edge.to(),
                    escape(content)
                )?,
                None => writeln!(out, "{}->{}", edge.from(), edge.to())?,
            }
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}

fn escape(value: &impl Display) -> String {
    let raw = value.to_string();
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
