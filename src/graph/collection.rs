//! Graph collection: graph heads over a shared vertex/edge universe
//!
//! Invariants, checked on construction and preserved by every operator:
//! 1. every edge endpoint is a vertex of the collection
//! 2. an edge in graph `g` implies both endpoints are in `g`
//! 3. graph head ids are unique
//! 4. every membership refers to a graph head of the collection

use super::edge::Edge;
use super::element::GraphElement;
use super::head::GraphHead;
use super::logical::LogicalGraph;
use super::types::{EdgeId, GraphId, VertexId};
use super::vertex::Vertex;
use crate::config::ExecutionEnvironment;
use crate::error::{GraphError, GraphResult};
use rustc_hash::FxHashMap;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Derived lookup maps; never the source of truth
#[derive(Debug, Clone, Default)]
struct MembershipIndex {
    /// GraphId -> vertices of that graph
    graph_vertices: FxHashMap<GraphId, BTreeSet<VertexId>>,
    /// GraphId -> edges of that graph
    graph_edges: FxHashMap<GraphId, BTreeSet<EdgeId>>,
    /// VertexId -> incident edges (either direction)
    incident: FxHashMap<VertexId, BTreeSet<EdgeId>>,
}

impl MembershipIndex {
    fn build(vertices: &BTreeMap<VertexId, Vertex>, edges: &BTreeMap<EdgeId, Edge>) -> Self {
        let mut index = MembershipIndex::default();
        for vertex in vertices.values() {
            for graph in &vertex.graph_ids {
                index.graph_vertices.entry(*graph).or_default().insert(vertex.id);
            }
        }
        for edge in edges.values() {
            for graph in &edge.graph_ids {
                index.graph_edges.entry(*graph).or_default().insert(edge.id);
            }
            index.incident.entry(edge.source).or_default().insert(edge.id);
            index.incident.entry(edge.target).or_default().insert(edge.id);
        }
        index
    }
}

/// A collection of logical graphs sharing one universe of vertices and edges
#[derive(Debug, Clone)]
pub struct GraphCollection {
    heads: BTreeMap<GraphId, GraphHead>,
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
    /// Declared order of the heads, set by `sort_by`
    order: Option<Vec<GraphId>>,
    index: MembershipIndex,
    env: Arc<ExecutionEnvironment>,
}

impl GraphCollection {
    /// Build a collection from its three element sets, validating all invariants.
    ///
    /// Vertices and edges without any membership are kept here; they are
    /// dropped by the first operator that re-projects the collection.
    pub fn new(
        heads: impl IntoIterator<Item = GraphHead>,
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> GraphResult<Self> {
        let mut head_map = BTreeMap::new();
        for head in heads {
            let id = head.id;
            if head_map.insert(id, head).is_some() {
                return Err(GraphError::DuplicateGraphHead(id));
            }
        }
        let mut vertex_map = BTreeMap::new();
        for vertex in vertices {
            let id = vertex.id;
            if vertex_map.insert(id, vertex).is_some() {
                return Err(GraphError::DuplicateVertex(id));
            }
        }
        let mut edge_map = BTreeMap::new();
        for edge in edges {
            let id = edge.id;
            if edge_map.insert(id, edge).is_some() {
                return Err(GraphError::DuplicateEdge(id));
            }
        }

        validate_parts(&head_map, &vertex_map, &edge_map)?;
        let index = MembershipIndex::build(&vertex_map, &edge_map);
        debug!(
            "Built collection: {} graphs, {} vertices, {} edges",
            head_map.len(),
            vertex_map.len(),
            edge_map.len()
        );
        Ok(GraphCollection {
            heads: head_map,
            vertices: vertex_map,
            edges: edge_map,
            order: None,
            index,
            env: ExecutionEnvironment::shared(),
        })
    }

    /// Collection without graphs
    pub fn empty() -> Self {
        GraphCollection {
            heads: BTreeMap::new(),
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
            order: None,
            index: MembershipIndex::default(),
            env: ExecutionEnvironment::shared(),
        }
    }

    /// Assemble a collection from detached logical graphs.
    ///
    /// Elements with the same id in several graphs are merged and their
    /// membership is exactly the set of graphs containing them. Every copy
    /// must agree on label, properties and endpoints; a copy that differs
    /// from an earlier one is a `ConflictingElement` error.
    pub fn from_graphs(graphs: impl IntoIterator<Item = LogicalGraph>) -> GraphResult<Self> {
        let mut graphs: Vec<LogicalGraph> = graphs.into_iter().collect();
        graphs.sort_by_key(|g| g.id());

        let mut heads = BTreeMap::new();
        let mut vertices: BTreeMap<VertexId, Vertex> = BTreeMap::new();
        let mut edges: BTreeMap<EdgeId, Edge> = BTreeMap::new();

        for graph in graphs {
            graph.validate()?;
            let id = graph.id();
            if heads.insert(id, graph.head).is_some() {
                return Err(GraphError::DuplicateGraphHead(id));
            }
            for (vid, vertex) in graph.vertices {
                match vertices.entry(vid) {
                    Entry::Occupied(mut merged) => {
                        if !same_vertex_content(merged.get(), &vertex) {
                            return Err(GraphError::ConflictingElement {
                                element: vid.to_string(),
                                graph: id,
                            });
                        }
                        merged.get_mut().add_graph(id);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(Vertex {
                            graph_ids: Default::default(),
                            ..vertex
                        })
                        .add_graph(id);
                    }
                }
            }
            for (eid, edge) in graph.edges {
                match edges.entry(eid) {
                    Entry::Occupied(mut merged) => {
                        if !same_edge_content(merged.get(), &edge) {
                            return Err(GraphError::ConflictingElement {
                                element: eid.to_string(),
                                graph: id,
                            });
                        }
                        merged.get_mut().add_graph(id);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(Edge {
                            graph_ids: Default::default(),
                            ..edge
                        })
                        .add_graph(id);
                    }
                }
            }
        }

        validate_parts(&heads, &vertices, &edges)?;
        let index = MembershipIndex::build(&vertices, &edges);
        Ok(GraphCollection {
            heads,
            vertices,
            edges,
            order: None,
            index,
            env: ExecutionEnvironment::shared(),
        })
    }

    /// Assemble operator output: restrict memberships to the surviving heads,
    /// drop orphaned elements and rebuild the indices.
    pub(crate) fn from_parts(
        heads: BTreeMap<GraphId, GraphHead>,
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
        order: Option<Vec<GraphId>>,
        env: Arc<ExecutionEnvironment>,
    ) -> Self {
        let vertices: BTreeMap<VertexId, Vertex> = vertices
            .into_iter()
            .filter_map(|mut v| v.retain_graphs(|g| heads.contains_key(&g)).then(|| (v.id, v)))
            .collect();
        let edges: BTreeMap<EdgeId, Edge> = edges
            .into_iter()
            .filter_map(|mut e| e.retain_graphs(|g| heads.contains_key(&g)).then(|| (e.id, e)))
            .filter(|(_, e)| vertices.contains_key(&e.source) && vertices.contains_key(&e.target))
            .collect();
        let order = order.map(|ids| ids.into_iter().filter(|id| heads.contains_key(id)).collect());

        debug_assert!(validate_parts(&heads, &vertices, &edges).is_ok());
        let index = MembershipIndex::build(&vertices, &edges);
        GraphCollection {
            heads,
            vertices,
            edges,
            order,
            index,
            env,
        }
    }

    /// Same collection, executed through `env`
    pub fn with_environment(mut self, env: Arc<ExecutionEnvironment>) -> Self {
        self.env = env;
        self
    }

    /// Declare an order; ids not in the collection are dropped
    pub(crate) fn with_order(mut self, order: Option<Vec<GraphId>>) -> Self {
        self.order = order.map(|ids| ids.into_iter().filter(|id| self.heads.contains_key(id)).collect());
        self
    }

    pub fn environment(&self) -> &Arc<ExecutionEnvironment> {
        &self.env
    }

    /// Number of logical graphs
    pub fn size(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a `sort_by` declared an order for the heads
    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    /// Graph ids in declared order, or ascending id order when none is declared
    pub fn graph_ids(&self) -> Vec<GraphId> {
        match &self.order {
            Some(order) => order.clone(),
            None => self.heads.keys().copied().collect(),
        }
    }

    /// Graph heads in the same order as [`graph_ids`](Self::graph_ids)
    pub fn graph_heads(&self) -> impl Iterator<Item = &GraphHead> + '_ {
        self.graph_ids().into_iter().filter_map(move |id| self.heads.get(&id))
    }

    pub fn graph_head(&self, id: GraphId) -> Option<&GraphHead> {
        self.heads.get(&id)
    }

    pub fn contains_graph(&self, id: GraphId) -> bool {
        self.heads.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Edges with `vertex` as source or target
    pub fn incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.index
            .incident
            .get(&vertex)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.edges.get(id))
    }

    /// Induced subgraph of one logical graph: its vertices and edges
    pub fn extent(&self, id: GraphId) -> Option<(Vec<&Vertex>, Vec<&Edge>)> {
        if !self.heads.contains_key(&id) {
            return None;
        }
        let vertices = self
            .index
            .graph_vertices
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|vid| self.vertices.get(vid))
            .collect();
        let edges = self
            .index
            .graph_edges
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|eid| self.edges.get(eid))
            .collect();
        Some((vertices, edges))
    }

    /// Detached copy of one logical graph
    pub fn graph(&self, id: GraphId) -> Option<LogicalGraph> {
        let head = self.heads.get(&id)?.clone();
        let (vertices, edges) = self.extent(id)?;
        Some(LogicalGraph {
            head,
            vertices: vertices.into_iter().map(|v| (v.id, v.clone())).collect(),
            edges: edges.into_iter().map(|e| (e.id, e.clone())).collect(),
        })
    }

    /// Detached copies of all logical graphs, in [`graph_ids`](Self::graph_ids) order
    pub fn graphs(&self) -> impl Iterator<Item = LogicalGraph> + '_ {
        self.graph_ids().into_iter().filter_map(move |id| self.graph(id))
    }

    /// Re-check every invariant
    pub fn validate(&self) -> GraphResult<()> {
        validate_parts(&self.heads, &self.vertices, &self.edges)
    }

    pub(crate) fn heads_map(&self) -> &BTreeMap<GraphId, GraphHead> {
        &self.heads
    }

    pub(crate) fn declared_order(&self) -> Option<&[GraphId]> {
        self.order.as_deref()
    }

    pub(crate) fn vertex_map(&self) -> &BTreeMap<VertexId, Vertex> {
        &self.vertices
    }

    pub(crate) fn edge_map(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }

    /// Largest id of any kind in the collection, used to seed fresh ids
    pub(crate) fn id_watermark(&self) -> u64 {
        let graph = self.heads.keys().next_back().map_or(0, GraphId::as_u64);
        let vertex = self.vertices.keys().next_back().map_or(0, VertexId::as_u64);
        let edge = self.edges.keys().next_back().map_or(0, EdgeId::as_u64);
        graph.max(vertex).max(edge)
    }
}

impl Default for GraphCollection {
    fn default() -> Self {
        Self::empty()
    }
}

/// Label and properties agree; memberships are not compared
fn same_vertex_content(a: &Vertex, b: &Vertex) -> bool {
    a.label == b.label && a.properties.canonical_form() == b.properties.canonical_form()
}

fn same_edge_content(a: &Edge, b: &Edge) -> bool {
    a.source == b.source
        && a.target == b.target
        && a.label == b.label
        && a.properties.canonical_form() == b.properties.canonical_form()
}

fn validate_parts(
    heads: &BTreeMap<GraphId, GraphHead>,
    vertices: &BTreeMap<VertexId, Vertex>,
    edges: &BTreeMap<EdgeId, Edge>,
) -> GraphResult<()> {
    for vertex in vertices.values() {
        if let Some(graph) = vertex.graph_ids.iter().find(|g| !heads.contains_key(g)) {
            return Err(GraphError::UnknownGraph {
                element: vertex.id.to_string(),
                graph: *graph,
            });
        }
    }
    for edge in edges.values() {
        if let Some(graph) = edge.graph_ids.iter().find(|g| !heads.contains_key(g)) {
            return Err(GraphError::UnknownGraph {
                element: edge.id.to_string(),
                graph: *graph,
            });
        }
        for endpoint in [edge.source, edge.target] {
            let vertex = vertices.get(&endpoint).ok_or(GraphError::ReferentialIntegrity {
                edge: edge.id,
                vertex: endpoint,
            })?;
            if let Some(graph) = edge.graph_ids.iter().find(|g| !vertex.is_member_of(**g)) {
                return Err(GraphError::InducedMembership {
                    edge: edge.id,
                    graph: *graph,
                    vertex: endpoint,
                });
            }
        }
    }
    Ok(())
}
