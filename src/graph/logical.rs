//! A single logical graph: head plus its induced vertices and edges
//!
//! This is the unit handed to user functions by `apply`, `reduce`, binary
//! graph functions and pluggable algorithms.

use super::edge::Edge;
use super::head::GraphHead;
use super::types::{EdgeId, GraphId, VertexId};
use super::vertex::Vertex;
use crate::error::{GraphError, GraphResult};
use std::collections::{BTreeMap, BTreeSet};

/// One logical graph, detached from any collection.
///
/// Membership sets on the contained elements are informational only: when a
/// logical graph is put into a collection, each element's membership is
/// recomputed from the graphs that contain it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalGraph {
    pub head: GraphHead,
    pub vertices: BTreeMap<VertexId, Vertex>,
    pub edges: BTreeMap<EdgeId, Edge>,
}

impl LogicalGraph {
    /// Graph without elements
    pub fn new(head: GraphHead) -> Self {
        LogicalGraph {
            head,
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Build a graph from elements, rejecting duplicate ids and dangling edges
    pub fn from_elements(
        head: GraphHead,
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> GraphResult<Self> {
        let mut graph = LogicalGraph::new(head);
        for vertex in vertices {
            graph.add_vertex(vertex)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn id(&self) -> GraphId {
        self.head.id
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_vertex(&mut self, mut vertex: Vertex) -> GraphResult<()> {
        if self.vertices.contains_key(&vertex.id) {
            return Err(GraphError::DuplicateVertex(vertex.id));
        }
        vertex.add_graph(self.head.id);
        self.vertices.insert(vertex.id, vertex);
        Ok(())
    }

    /// Add an edge; both endpoints must already be in the graph
    pub fn add_edge(&mut self, mut edge: Edge) -> GraphResult<()> {
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        for endpoint in [edge.source, edge.target] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::ReferentialIntegrity {
                    edge: edge.id,
                    vertex: endpoint,
                });
            }
        }
        edge.add_graph(self.head.id);
        self.edges.insert(edge.id, edge);
        Ok(())
    }

    /// Remove a vertex together with its incident edges
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let removed = self.vertices.remove(&id)?;
        self.edges.retain(|_, e| !e.is_incident_to(id));
        Some(removed)
    }

    /// Check that every edge references vertices of this graph
    pub fn validate(&self) -> GraphResult<()> {
        for edge in self.edges.values() {
            for endpoint in [edge.source, edge.target] {
                if !self.vertices.contains_key(&endpoint) {
                    return Err(GraphError::ReferentialIntegrity {
                        edge: edge.id,
                        vertex: endpoint,
                    });
                }
            }
        }
        Ok(())
    }

    /// Vertices with no incident edge in this graph
    pub fn isolated_vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        let connected: BTreeSet<VertexId> = self
            .edges
            .values()
            .flat_map(|e| [e.source, e.target])
            .collect();
        self.vertices.values().filter(move |v| !connected.contains(&v.id))
    }

    pub fn outgoing_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |e| e.starts_from(vertex))
    }

    pub fn incoming_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |e| e.ends_at(vertex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphElement;

    fn knows_graph() -> LogicalGraph {
        LogicalGraph::from_elements(
            GraphHead::new(GraphId::new(1), "Friends"),
            vec![
                Vertex::new(VertexId::new(1), "Person"),
                Vertex::new(VertexId::new(2), "Person"),
                Vertex::new(VertexId::new(3), "Person"),
            ],
            vec![Edge::new(EdgeId::new(10), VertexId::new(1), VertexId::new(2), "knows")],
        )
        .unwrap()
    }

    #[test]
    fn test_from_elements_sets_membership() {
        let graph = knows_graph();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.vertices[&VertexId::new(1)].is_member_of(GraphId::new(1)));
        assert!(graph.edges[&EdgeId::new(10)].is_member_of(GraphId::new(1)));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let err = LogicalGraph::from_elements(
            GraphHead::new(GraphId::new(1), ""),
            vec![Vertex::new(VertexId::new(1), "A")],
            vec![Edge::new(EdgeId::new(1), VertexId::new(1), VertexId::new(2), "x")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GraphError::ReferentialIntegrity { vertex, .. } if vertex == VertexId::new(2)
        ));
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut graph = knows_graph();
        let err = graph.add_vertex(Vertex::new(VertexId::new(1), "Person")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateVertex(_)));
    }

    #[test]
    fn test_isolated_vertices() {
        let graph = knows_graph();
        let isolated: Vec<VertexId> = graph.isolated_vertices().map(|v| v.id).collect();
        assert_eq!(isolated, vec![VertexId::new(3)]);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut graph = knows_graph();
        assert!(graph.remove_vertex(VertexId::new(2)).is_some());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.validate().is_ok());
        assert_eq!(graph.outgoing_edges(VertexId::new(1)).count(), 0);
    }
}
