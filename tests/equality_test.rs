mod common;

use common::{cycle, gid, init_tracing, single_edge, vid};
use epgm::equality::{collection_signatures, graph_signature, graphs_equal};
use epgm::graph::{Edge, EdgeId, GraphHead, Labeled, LogicalGraph, Vertex};
use epgm::GraphCollection;
use std::collections::BTreeSet;

/// Small graph with properties on both vertices and edges
fn social(graph: u64, offset: u64) -> LogicalGraph {
    LogicalGraph::from_elements(
        GraphHead::new(gid(graph), "Community").with_property("interest", "graphs"),
        vec![
            Vertex::new(vid(offset + 1), "Person").with_property("name", "Alice"),
            Vertex::new(vid(offset + 2), "Person").with_property("name", "Bob"),
            Vertex::new(vid(offset + 3), "Tag").with_property("name", "rust"),
            Vertex::new(vid(offset + 4), "Person").with_property("name", "Eve"),
        ],
        vec![
            Edge::new(EdgeId::new(offset + 1), vid(offset + 1), vid(offset + 2), "knows").with_property("since", 2014i64),
            Edge::new(EdgeId::new(offset + 2), vid(offset + 2), vid(offset + 1), "knows").with_property("since", 2014i64),
            Edge::new(EdgeId::new(offset + 3), vid(offset + 1), vid(offset + 3), "hasInterest"),
        ],
    )
    .unwrap()
}

#[test]
fn test_signature_invariant_under_relabeling() {
    init_tracing();
    let original = social(1, 0);
    let relabeled = social(99, 1000);
    assert_eq!(graph_signature(&original), graph_signature(&relabeled));
}

/// Copy of `graph` under new vertex and edge ids
fn relabel(
    graph: &LogicalGraph,
    id: u64,
    vertex_id: impl Fn(u64) -> u64,
    edge_id: impl Fn(u64) -> u64,
) -> LogicalGraph {
    let vertices = graph.vertices.values().map(|v| Vertex {
        id: vid(vertex_id(v.id.as_u64())),
        graph_ids: Default::default(),
        ..v.clone()
    });
    let edges = graph.edges.values().map(|e| Edge {
        id: EdgeId::new(edge_id(e.id.as_u64())),
        source: vid(vertex_id(e.source.as_u64())),
        target: vid(vertex_id(e.target.as_u64())),
        graph_ids: Default::default(),
        ..e.clone()
    });
    LogicalGraph::from_elements(GraphHead::new(gid(id), "Community"), vertices, edges).unwrap()
}

#[test]
fn test_signature_invariant_under_permuted_ids() {
    let original = social(1, 0);

    // Reversed vertex ids and a rotation of the edge ids
    let reversed = relabel(&original, 2, |v| 5 - v, |e| e % 3 + 1);
    assert_eq!(reversed.vertices[&vid(4)].property("name").and_then(|p| p.as_string()), Some("Alice"));
    assert_eq!(graph_signature(&original), graph_signature(&reversed));

    // Scattered ids that interleave with the original ones
    let scattered = relabel(&original, 3, |v| [0, 40, 10, 30, 20][v as usize], |e| [0, 7, 2, 5][e as usize]);
    assert_eq!(graph_signature(&original), graph_signature(&scattered));
    assert!(graphs_equal(&reversed, &scattered));
}

#[test]
fn test_content_changes_signature() {
    let original = social(1, 0);

    let mut renamed = original.clone();
    if let Some(v) = renamed.vertices.get_mut(&vid(4)) {
        v.set_property("name", "Mallory");
    }
    assert!(!graphs_equal(&original, &renamed));

    let mut retyped = original.clone();
    if let Some(e) = retyped.edges.get_mut(&EdgeId::new(1)) {
        e.set_property("since", "2014");
    }
    assert!(!graphs_equal(&original, &retyped));

    let mut fewer = original.clone();
    fewer.remove_vertex(vid(4));
    assert!(!graphs_equal(&original, &fewer));
}

#[test]
fn test_head_is_not_part_of_signature() {
    let mut a = social(1, 0);
    a.head.set_property("interest", "databases");
    assert!(graphs_equal(&a, &social(2, 100)));
}

#[test]
fn test_distinct_single_edge_graphs() {
    // A --knows--> B and X --knows--> Y
    let collection = GraphCollection::from_graphs(vec![
        single_edge(1, [1, 2, 1], "Person", "knows"),
        single_edge(2, [3, 4, 2], "Person", "knows"),
    ])
    .unwrap();

    let distinct = collection.distinct();
    assert_eq!(distinct.size(), 1);
    assert_eq!(distinct.graph_ids(), vec![gid(1)]);
    assert!(distinct.validate().is_ok());
}

#[test]
fn test_distinct_leaves_unique_signatures() {
    let collection = GraphCollection::from_graphs(vec![
        social(5, 0),
        social(3, 100),
        single_edge(4, [201, 202, 201], "Person", "knows"),
        single_edge(9, [203, 204, 202], "Person", "likes"),
        single_edge(7, [205, 206, 203], "Person", "knows"),
    ])
    .unwrap();

    let distinct = collection.distinct();
    assert_eq!(distinct.graph_ids(), vec![gid(3), gid(4), gid(9)]);

    let signatures: Vec<_> = collection_signatures(&distinct).into_iter().map(|(_, s)| s).collect();
    let unique: BTreeSet<_> = signatures.iter().collect();
    assert_eq!(unique.len(), signatures.len());
}

#[test]
fn test_equals_by_graph_data() {
    let a = GraphCollection::from_graphs(vec![social(1, 0), single_edge(2, [10, 11, 10], "P", "e")]).unwrap();
    let b = GraphCollection::from_graphs(vec![single_edge(8, [50, 51, 50], "P", "e"), social(9, 60)]).unwrap();
    assert!(a.equals_by_graph_data(&b));
    assert!(!a.equals_by_graph_ids(&b));

    let c = GraphCollection::from_graphs(vec![social(1, 0), single_edge(2, [10, 11, 10], "P", "f")]).unwrap();
    assert!(!a.equals_by_graph_data(&c));
}

/// One round of content refinement cannot tell a 6-cycle from two
/// 3-cycles when every vertex carries the same label.
#[test]
fn test_known_limitation_cycles_collide() {
    let six = cycle(1, &[1, 2, 3, 4, 5, 6], 1);

    let mut two_triangles = cycle(2, &[11, 12, 13], 11);
    let other = cycle(2, &[14, 15, 16], 14);
    two_triangles.vertices.extend(other.vertices);
    two_triangles.edges.extend(other.edges);
    assert!(two_triangles.validate().is_ok());

    assert!(graphs_equal(&six, &two_triangles));
}
