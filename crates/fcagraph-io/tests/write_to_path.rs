//! File-level writer tests: extension dispatch and reproducible output.

use fcagraph_core::{DGraph, IdAllocator, RandomConfig, seeded_random_graph};
use fcagraph_io::{WriteError, WriterRegistry};

fn closure_chain() -> DGraph<String, String> {
    let mut ids = IdAllocator::new();
    let nodes: Vec<_> = ["bottom", "middle", "top"]
        .into_iter()
        .map(|label| ids.node(label.to_string()))
        .collect();
    let n: Vec<_> = nodes.iter().map(fcagraph_core::Node::id).collect();
    let mut graph = DGraph::from_nodes(nodes);
    graph.add_edge_with_content(n[0], n[1], "covers".to_string());
    graph.add_edge(n[1], n[2]);
    graph.transitive_closure();
    graph
}

#[test]
fn dot_extension_selects_dot_writer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lattice.dot");
    let registry = WriterRegistry::with_defaults();

    registry
        .write_to_path(&closure_chain(), &path)
        .expect("write dot file");

    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("digraph G {\n"));
    assert!(text.contains("1 [label=\"bottom\"]"));
    assert!(text.contains("1->2 [label=\"covers\"]"));
    assert!(text.contains("1->3\n"), "closure edge has no label");
    assert!(text.ends_with("}\n"));
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("LATTICE.DOT");
    let registry = WriterRegistry::with_defaults();

    registry
        .write_to_path(&closure_chain(), &path)
        .expect("case-insensitive tag");

    assert!(path.exists());
}

#[test]
fn unknown_extension_creates_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lattice.gml");
    let registry = WriterRegistry::with_defaults();

    let err = registry
        .write_to_path(&closure_chain(), &path)
        .expect_err("gml has no writer");

    assert!(matches!(err, WriteError::UnknownFormat(ref tag) if tag == "gml"));
    assert!(!path.exists());
}

#[test]
fn missing_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lattice");
    let registry = WriterRegistry::with_defaults();

    let err = registry
        .write_to_path(&closure_chain(), &path)
        .expect_err("no extension");

    assert!(matches!(err, WriteError::MissingExtension(_)));
}

/// Random graphs have unit edge payloads; give them printable ones.
fn labelled(graph: &DGraph<usize>) -> DGraph<usize, String> {
    let mut out = DGraph::from_nodes(graph.nodes().cloned());
    for edge in graph.edges() {
        out.add_edge(edge.from(), edge.to());
    }
    out
}

#[test]
fn output_is_reproducible_for_equal_graphs() {
    let config = RandomConfig {
        seed: 11,
        ..RandomConfig::default()
    };
    let left = labelled(&seeded_random_graph(15, &config, &mut IdAllocator::new()));
    let right = labelled(&seeded_random_graph(15, &config, &mut IdAllocator::new()));
    let registry = WriterRegistry::with_defaults();

    let mut a: Vec<u8> = Vec::new();
    let mut b: Vec<u8> = Vec::new();
    registry.write("dot", &left, &mut a).expect("left");
    registry.write("dot", &right, &mut b).expect("right");

    assert_eq!(a, b);
    assert_eq!(left.fingerprint(), right.fingerprint());
    assert_eq!(
        String::from_utf8(a).expect("utf8").lines().count(),
        3 + left.node_count() + left.edge_count()
    );
}
