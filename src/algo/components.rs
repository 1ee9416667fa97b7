//! Weakly connected components as a collection algorithm
//!
//! Every logical graph is split into one new graph per weakly connected
//! component. New graphs get fresh ids above every id of the input and carry
//! the id of the graph they came from in the `source_graph` property.
//! Graphs without vertices produce no output graph.

use super::{build_view, check_arity, CollectionAlgorithm};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, GraphCollection, GraphHead, GraphId, IdGenerator, LogicalGraph, Vertex, VertexId};
use epgm_algorithms::weakly_connected_components;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_LABEL: &str = "component";
pub const SOURCE_GRAPH_KEY: &str = "source_graph";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedComponents;

/// Split one graph into its components, each as (vertices, edges)
fn split(graph: &LogicalGraph) -> Vec<(Vec<Vertex>, Vec<Edge>)> {
    let view = build_view(graph);
    let result = weakly_connected_components(&view);

    let mut parts: BTreeMap<u64, (Vec<Vertex>, Vec<Edge>)> = BTreeMap::new();
    for (id, vertex) in &graph.vertices {
        if let Some(component) = result.vertex_component.get(&id.as_u64()) {
            parts.entry(*component).or_default().0.push(vertex.clone());
        }
    }
    for edge in graph.edges.values() {
        if let Some(component) = result.vertex_component.get(&edge.source.as_u64()) {
            parts.entry(*component).or_default().1.push(edge.clone());
        }
    }
    parts.into_values().collect()
}

impl CollectionAlgorithm for ConnectedComponents {
    fn name(&self) -> &str {
        "ConnectedComponents"
    }

    fn execute(&self, collection: &GraphCollection, params: &[&str]) -> GraphResult<GraphCollection> {
        check_arity(self.name(), params, 1)?;
        let label = params.first().copied().unwrap_or(DEFAULT_LABEL);

        let sources: Vec<LogicalGraph> = collection.graphs().collect();
        let split_graphs = collection
            .environment()
            .map(sources, |graph| (graph.id(), split(&graph)));

        // Ids are handed out sequentially in graph order so output is deterministic
        let ids = IdGenerator::starting_after(collection.id_watermark());
        let mut graphs = Vec::new();
        for (source, parts) in split_graphs {
            let source_id = i64::try_from(source.as_u64()).map_err(|_| GraphError::Algorithm {
                name: self.name().to_string(),
                message: format!("{} does not fit the integer property {}", source, SOURCE_GRAPH_KEY),
            })?;
            for (vertices, edges) in parts {
                let head = GraphHead::new(ids.next_graph_id(), label).with_property(SOURCE_GRAPH_KEY, source_id);
                graphs.push(component_graph(head, vertices, edges)?);
            }
        }

        debug!("ConnectedComponents: {} graphs -> {} components", collection.size(), graphs.len());
        Ok(GraphCollection::from_graphs(graphs)?.with_environment(collection.environment().clone()))
    }
}

fn component_graph(head: GraphHead, vertices: Vec<Vertex>, edges: Vec<Edge>) -> GraphResult<LogicalGraph> {
    // Memberships are recomputed by `from_graphs`
    LogicalGraph::from_elements(head, vertices, edges)
}

/// Component graphs of `collection` that were split from `source`
pub fn components_of(collection: &GraphCollection, source: GraphId) -> Vec<GraphId> {
    collection
        .graph_heads()
        .filter(|h| {
            h.properties
                .get(SOURCE_GRAPH_KEY)
                .and_then(|v| v.as_integer())
                .is_some_and(|id| u64::try_from(id).ok() == Some(source.as_u64()))
        })
        .map(|h| h.id)
        .collect()
}

/// Vertex ids of one component graph
pub fn component_members(collection: &GraphCollection, component: GraphId) -> Vec<VertexId> {
    collection
        .extent(component)
        .map(|(vertices, _)| vertices.iter().map(|v| v.id).collect())
        .unwrap_or_default()
}
