//! Binary graph functions for `reduce`
//!
//! Both functions are associative and commutative: the result head is the
//! head with the smaller id, and an element present in both inputs keeps the
//! union of both memberships and the copy whose canonical label is smaller.
//! The choice depends only on the copies, so the result does not depend on
//! how a fold groups its inputs, even when the copies disagree.

use crate::equality::{edge_label, vertex_label};
use crate::graph::{Edge, LogicalGraph, Vertex};
use std::collections::BTreeMap;

/// Order the pair so the graph with the smaller id comes first
fn by_id(a: LogicalGraph, b: LogicalGraph) -> (LogicalGraph, LogicalGraph) {
    if a.id() <= b.id() {
        (a, b)
    } else {
        (b, a)
    }
}

fn merge_vertex(a: Vertex, b: Vertex) -> Vertex {
    let (mut kept, other) = if vertex_label(&b) < vertex_label(&a) { (b, a) } else { (a, b) };
    kept.graph_ids.extend(other.graph_ids);
    kept
}

fn merge_edge(a: Edge, b: Edge) -> Edge {
    let key = |e: &Edge| (e.source, e.target, edge_label("", e, ""));
    let (mut kept, other) = if key(&b) < key(&a) { (b, a) } else { (a, b) };
    kept.graph_ids.extend(other.graph_ids);
    kept
}

/// All vertices and edges of both graphs
pub fn combine(a: LogicalGraph, b: LogicalGraph) -> LogicalGraph {
    let (mut first, second) = by_id(a, b);
    for (id, vertex) in second.vertices {
        let merged = match first.vertices.remove(&id) {
            Some(existing) => merge_vertex(existing, vertex),
            None => vertex,
        };
        first.vertices.insert(id, merged);
    }
    for (id, edge) in second.edges {
        let merged = match first.edges.remove(&id) {
            Some(existing) => merge_edge(existing, edge),
            None => edge,
        };
        first.edges.insert(id, merged);
    }
    first
}

/// Vertices and edges contained in both graphs
pub fn overlap(a: LogicalGraph, b: LogicalGraph) -> LogicalGraph {
    let (first, mut second) = by_id(a, b);
    let vertices: BTreeMap<_, _> = first
        .vertices
        .into_iter()
        .filter_map(|(id, vertex)| second.vertices.remove(&id).map(|other| (id, merge_vertex(vertex, other))))
        .collect();
    // An edge in both graphs has both endpoints in both graphs
    let edges: BTreeMap<_, _> = first
        .edges
        .into_iter()
        .filter_map(|(id, edge)| second.edges.remove(&id).map(|other| (id, merge_edge(edge, other))))
        .collect();
    LogicalGraph {
        head: first.head,
        vertices,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeId, GraphElement, GraphHead, GraphId, Labeled, VertexId};

    fn path(graph: u64, vertices: &[u64]) -> LogicalGraph {
        let vs = vertices
            .iter()
            .map(|&id| Vertex::new(VertexId::new(id), "V").with_property("from", graph as i64));
        let es = vertices.windows(2).map(|w| {
            Edge::new(EdgeId::new(w[0] * 100 + w[1]), VertexId::new(w[0]), VertexId::new(w[1]), "e")
        });
        LogicalGraph::from_elements(GraphHead::new(GraphId::new(graph), format!("g{}", graph)), vs, es)
            .unwrap()
    }

    #[test]
    fn test_combine() {
        let result = combine(path(2, &[1, 2, 3]), path(1, &[3, 4]));
        assert_eq!(result.id(), GraphId::new(1));
        assert_eq!(result.vertex_count(), 4);
        assert_eq!(result.edge_count(), 3);
        // Shared vertex 3 keeps the smaller copy and both memberships
        let shared = &result.vertices[&VertexId::new(3)];
        assert_eq!(shared.property("from").and_then(|v| v.as_integer()), Some(1));
        assert_eq!(shared.graph_count(), 2);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_combine_commutes() {
        let ab = combine(path(1, &[1, 2]), path(2, &[2, 3]));
        let ba = combine(path(2, &[2, 3]), path(1, &[1, 2]));
        assert_eq!(ab, ba);
    }

    fn single(graph: u64, vertex: u64, from: i64) -> LogicalGraph {
        let v = Vertex::new(VertexId::new(vertex), "V").with_property("from", from);
        LogicalGraph::from_elements(GraphHead::new(GraphId::new(graph), ""), vec![v], Vec::new()).unwrap()
    }

    #[test]
    fn test_combine_associates_on_diverging_copies() {
        // Vertex 9 carries different content in graphs 3 and 2
        let (a, b, c) = (single(1, 1, 1), single(3, 9, 3), single(2, 9, 2));
        let left = combine(combine(a.clone(), b.clone()), c.clone());
        let right = combine(a.clone(), combine(b.clone(), c.clone()));
        let swapped = combine(combine(c, a), b);
        assert_eq!(left, right);
        assert_eq!(left, swapped);

        let shared = &left.vertices[&VertexId::new(9)];
        assert_eq!(shared.property("from").and_then(|v| v.as_integer()), Some(2));
        assert_eq!(shared.graph_count(), 2);
    }

    #[test]
    fn test_diverging_edges_merge_by_content() {
        let graph = |id: u64, source: u64, target: u64| {
            let vs = [1, 2].map(|v| Vertex::new(VertexId::new(v), "V"));
            let e = Edge::new(EdgeId::new(5), VertexId::new(source), VertexId::new(target), "e");
            LogicalGraph::from_elements(GraphHead::new(GraphId::new(id), ""), vs, vec![e]).unwrap()
        };
        let (a, b, c) = (graph(3, 2, 1), graph(1, 1, 1), graph(2, 1, 2));
        let left = overlap(overlap(a.clone(), b.clone()), c.clone());
        let right = overlap(a.clone(), overlap(b.clone(), c.clone()));
        assert_eq!(left, right);
        assert_eq!(left.edges[&EdgeId::new(5)].target, VertexId::new(1));
        assert!(left.validate().is_ok());

        assert_eq!(combine(combine(a.clone(), b.clone()), c.clone()), combine(a, combine(b, c)));
    }

    #[test]
    fn test_overlap() {
        let result = overlap(path(5, &[1, 2, 3]), path(4, &[2, 3, 4]));
        assert_eq!(result.id(), GraphId::new(4));
        let ids: Vec<u64> = result.vertices.keys().map(|v| v.as_u64()).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(result.edge_count(), 1);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_overlap_associates() {
        let (a, b, c) = (path(1, &[1, 2, 3]), path(2, &[2, 3, 4]), path(3, &[3, 4]));
        let left = overlap(overlap(a.clone(), b.clone()), c.clone());
        let right = overlap(a, overlap(b, c));
        assert_eq!(left, right);
        assert_eq!(left.vertex_count(), 1);
    }
}
