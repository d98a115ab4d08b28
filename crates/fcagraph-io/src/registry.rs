//! Format-tag → writer registry.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fcagraph_core::DGraph;
use tracing::{debug, instrument};

use crate::dot::DotWriter;
use crate::error::WriteError;

/// Serializes a graph into a byte sink.
pub trait GraphWriter<N, E> {
    /// Write `graph` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] if `out` fails.
    fn write(&self, graph: &DGraph<N, E>, out: &mut dyn Write) -> Result<(), WriteError>;
}

/// Writers keyed by lower-case format tag.
pub struct WriterRegistry<N, E> {
    writers: BTreeMap<String, Box<dyn GraphWriter<N, E>>>,
}

impl<N, E> Default for WriterRegistry<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> WriterRegistry<N, E> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writers: BTreeMap::new(),
        }
    }

    /// Register `writer` under `format`, replacing any previous writer.
    /// Returns `true` if a writer was replaced.
    pub fn register(&mut self, format: &str, writer: Box<dyn GraphWriter<N, E>>) -> bool {
        self.writers
            .insert(format.to_ascii_lowercase(), writer)
            .is_some()
    }

    #[must_use]
    pub fn get(&self, format: &str) -> Option<&dyn GraphWriter<N, E>> {
        match self.writers.get(&format.to_ascii_lowercase()) {
            Some(writer) => Some(&**writer),
            None => None,
        }
    }

    /// Registered format tags in sorted order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.writers.keys().map(String::as_str)
    }

    /// Write `graph` in `format` to `out`.
    ///
    /// # Errors
    ///
    /// [`WriteError::UnknownFormat`] if nothing is registered for `format`,
    /// otherwise whatever the writer reports.
    #[instrument(skip(self, graph, out))]
    pub fn write(
        &self,
        format: &str,
        graph: &DGraph<N, E>,
        out: &mut dyn Write,
    ) -> Result<(), WriteError> {
        let writer = self
            .get(format)
            .ok_or_else(|| WriteError::UnknownFormat(format.to_string()))?;
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "writing graph");
        writer.write(graph, out)
    }

    /// Write `graph` to `path`, choosing the writer by file extension.
    ///
    /// # Errors
    ///
    /// [`WriteError::MissingExtension`] or [`WriteError::UnknownFormat`]
    /// before anything is created on disk; [`WriteError::Io`] if the file
    /// cannot be created or written.
    pub fn write_to_path(&self, graph: &DGraph<N, E>, path: &Path) -> Result<(), WriteError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| WriteError::MissingExtension(path.to_path_buf()))?;
        if self.get(format).is_none() {
            return Err(WriteError::UnknownFormat(format.to_string()));
        }

        let mut out = BufWriter::new(File::create(path)?);
        self.write(format, graph, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl<N: std::fmt::Display, E: std::fmt::Display> WriterRegistry<N, E> {
    /// Registry with every built-in writer registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DotWriter::FORMAT, Box::new(DotWriter));
        registry
    }
}

#[cfg(test)]
mod tests {
    use fcagraph_core::IdAllocator;

    use super::*;

    struct CountWriter;

    impl GraphWriter<u8, u8> for CountWriter {
        fn write(&self, graph: &DGraph<u8, u8>, out: &mut dyn Write) -> Result<(), WriteError> {
            writeln!(out, "{} {}", graph.node_count(), graph.edge_count())?;
            Ok(())
        }
    }

    fn sample() -> DGraph<u8, u8> {
        let mut ids = IdAllocator::new();
        let (a, b) = (ids.node(1), ids.node(2));
        let (ia, ib) = (a.id(), b.id());
        let mut graph = DGraph::from_nodes([a, b]);
        graph.add_edge(ia, ib);
        graph
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry: WriterRegistry<u8, u8> = WriterRegistry::new();
        assert!(!registry.register("CNT", Box::new(CountWriter)));
        assert!(registry.register("cnt", Box::new(CountWriter)));

        assert!(registry.get("Cnt").is_some());
        assert_eq!(registry.formats().collect::<Vec<_>>(), vec!["cnt"]);
    }

    #[test]
    fn dispatches_to_registered_writer() {
        let mut registry: WriterRegistry<u8, u8> = WriterRegistry::new();
        registry.register("cnt", Box::new(CountWriter));

        let mut out: Vec<u8> = Vec::new();
        registry.write("cnt", &sample(), &mut out).expect("write");

        assert_eq!(String::from_utf8(out).expect("utf8"), "2 1\n");
    }

    #[test]
    fn unknown_format_is_reported() {
        let registry: WriterRegistry<u8, u8> = WriterRegistry::with_defaults();

        let err = registry
            .write("gml", &sample(), &mut Vec::<u8>::new())
            .expect_err("gml is not registered");

        assert!(matches!(err, WriteError::UnknownFormat(tag) if tag == "gml"));
    }

    #[test]
    fn defaults_include_dot() {
        let registry: WriterRegistry<u8, u8> = WriterRegistry::with_defaults();
        assert_eq!(registry.formats().collect::<Vec<_>>(), vec!["dot"]);
    }
}
