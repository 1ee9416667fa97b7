//! Canonical labels: content-derived, id-independent strings for vertices,
//! edges and whole graphs

use crate::graph::{Edge, Labeled, LogicalGraph, Vertex, VertexId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Fixed-width digest of a graph's canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphSignature(pub [u8; 32]);

impl GraphSignature {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for GraphSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// `label` followed by the canonical property form, e.g. `6#Person{4#name:string:5#Alice}`
pub fn vertex_label(vertex: &Vertex) -> String {
    entity_label(vertex)
}

/// `source -> label{properties} -> target`, with both endpoints rendered by
/// [`vertex_label`]
pub fn edge_label(source: &str, edge: &Edge, target: &str) -> String {
    format!("{}->{}->{}", source, entity_label(edge), target)
}

fn entity_label(entity: &impl Labeled) -> String {
    let label = entity.label().as_str();
    format!("{}#{}{}", label.len(), label, entity.properties().canonical_form())
}

/// Signature of one graph given its vertices and edges.
///
/// Sorted edge labels followed by the sorted labels of isolated vertices,
/// hashed with SHA-256. Endpoints missing from `vertices` render as an empty
/// label.
pub fn signature_of(vertices: &[&Vertex], edges: &[&Edge]) -> GraphSignature {
    let labels: FxHashMap<VertexId, String> =
        vertices.iter().map(|v| (v.id, vertex_label(v))).collect();
    let missing = String::new();
    let label_of = |id: VertexId| labels.get(&id).unwrap_or(&missing);

    let mut edge_labels: Vec<String> = edges
        .iter()
        .map(|e| edge_label(label_of(e.source), e, label_of(e.target)))
        .collect();
    edge_labels.sort_unstable();

    let connected: FxHashSet<VertexId> = edges.iter().flat_map(|e| [e.source, e.target]).collect();
    let mut isolated: Vec<&str> = vertices
        .iter()
        .filter(|v| !connected.contains(&v.id))
        .map(|v| labels[&v.id].as_str())
        .collect();
    isolated.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(b"E");
    hasher.update((edge_labels.len() as u64).to_le_bytes());
    for label in &edge_labels {
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
    }
    hasher.update(b"V");
    hasher.update((isolated.len() as u64).to_le_bytes());
    for label in isolated {
        hasher.update((label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
    }
    GraphSignature(hasher.finalize().into())
}

/// Signature of a detached logical graph
pub fn graph_signature(graph: &LogicalGraph) -> GraphSignature {
    let vertices: Vec<&Vertex> = graph.vertices.values().collect();
    let edges: Vec<&Edge> = graph.edges.values().collect();
    signature_of(&vertices, &edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeId, GraphHead, GraphId};

    #[test]
    fn test_vertex_label_is_content_only() {
        let a = Vertex::new(VertexId::new(1), "Person").with_property("name", "Alice");
        let b = Vertex::new(VertexId::new(99), "Person").with_property("name", "Alice");
        assert_eq!(vertex_label(&a), vertex_label(&b));
        assert_eq!(vertex_label(&a), "6#Person{4#name:string:5#Alice}");
    }

    #[test]
    fn test_edge_label_format() {
        let source = Vertex::new(VertexId::new(1), "A");
        let target = Vertex::new(VertexId::new(2), "B");
        let edge = Edge::new(EdgeId::new(5), source.id, target.id, "knows");
        assert_eq!(
            edge_label(&vertex_label(&source), &edge, &vertex_label(&target)),
            "1#A{}->5#knows{}->1#B{}"
        );
    }

    #[test]
    fn test_direction_matters() {
        let head = GraphHead::new(GraphId::new(1), "");
        let forward = LogicalGraph::from_elements(
            head.clone(),
            vec![Vertex::new(VertexId::new(1), "A"), Vertex::new(VertexId::new(2), "B")],
            vec![Edge::new(EdgeId::new(1), VertexId::new(1), VertexId::new(2), "e")],
        )
        .unwrap();
        let backward = LogicalGraph::from_elements(
            head,
            vec![Vertex::new(VertexId::new(1), "A"), Vertex::new(VertexId::new(2), "B")],
            vec![Edge::new(EdgeId::new(1), VertexId::new(2), VertexId::new(1), "e")],
        )
        .unwrap();
        assert_ne!(graph_signature(&forward), graph_signature(&backward));
    }

    #[test]
    fn test_isolated_vertices_count() {
        let one = LogicalGraph::from_elements(
            GraphHead::new(GraphId::new(1), ""),
            vec![Vertex::new(VertexId::new(1), "A")],
            Vec::new(),
        )
        .unwrap();
        let two = LogicalGraph::from_elements(
            GraphHead::new(GraphId::new(2), ""),
            vec![Vertex::new(VertexId::new(1), "A"), Vertex::new(VertexId::new(2), "A")],
            Vec::new(),
        )
        .unwrap();
        assert_ne!(graph_signature(&one), graph_signature(&two));
    }

    #[test]
    fn test_signature_display_is_hex() {
        let empty = LogicalGraph::new(GraphHead::new(GraphId::new(1), ""));
        let hex = graph_signature(&empty).to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
