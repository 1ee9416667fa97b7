#![allow(dead_code)]

use epgm::graph::{Edge, EdgeId, GraphHead, GraphId, LogicalGraph, Vertex, VertexId};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn gid(id: u64) -> GraphId {
    GraphId::new(id)
}

pub fn vid(id: u64) -> VertexId {
    VertexId::new(id)
}

/// Graph `graph` with one edge `ids[0] -label-> ids[1]` (edge id `ids[2]`),
/// both endpoints labelled `vertex_label`
pub fn single_edge(graph: u64, ids: [u64; 3], vertex_label: &str, label: &str) -> LogicalGraph {
    LogicalGraph::from_elements(
        GraphHead::new(gid(graph), "G"),
        vec![
            Vertex::new(vid(ids[0]), vertex_label),
            Vertex::new(vid(ids[1]), vertex_label),
        ],
        vec![Edge::new(EdgeId::new(ids[2]), vid(ids[0]), vid(ids[1]), label)],
    )
    .unwrap()
}

/// Directed cycle over `vertices`, edge ids starting at `first_edge`
pub fn cycle(graph: u64, vertices: &[u64], first_edge: u64) -> LogicalGraph {
    let vs = vertices.iter().map(|&id| Vertex::new(vid(id), "V"));
    let es = (0..vertices.len()).map(|i| {
        let next = (i + 1) % vertices.len();
        Edge::new(
            EdgeId::new(first_edge + i as u64),
            vid(vertices[i]),
            vid(vertices[next]),
            "e",
        )
    });
    LogicalGraph::from_elements(GraphHead::new(gid(graph), "C"), vs, es).unwrap()
}
