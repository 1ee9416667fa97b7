//! Edge entity

use super::element::{GraphElement, GraphIdSet, Labeled};
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, GraphId, Label, VertexId};
use serde::{Deserialize, Serialize};

/// A directed edge of the shared universe
///
/// Edges have:
/// - A unique ID
/// - A source vertex (the edge goes FROM it)
/// - A target vertex
/// - A label and properties
/// - The set of logical graphs they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    pub label: Label,

    /// Source vertex (edge goes FROM this vertex)
    pub source: VertexId,

    /// Target vertex (edge goes TO this vertex)
    pub target: VertexId,

    pub properties: PropertyMap,

    /// Logical graphs containing this edge
    pub graph_ids: GraphIdSet,
}

impl Edge {
    /// Create a directed edge without properties or memberships
    pub fn new(
        id: EdgeId,
        source: VertexId,
        target: VertexId,
        label: impl Into<Label>,
    ) -> Self {
        Edge {
            id,
            label: label.into(),
            source,
            target,
            properties: PropertyMap::new(),
            graph_ids: GraphIdSet::new(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }

    pub fn in_graphs(mut self, graphs: impl IntoIterator<Item = GraphId>) -> Self {
        self.graph_ids.extend(graphs);
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.set(key, value)
    }

    pub fn add_graph(&mut self, graph: GraphId) -> bool {
        self.graph_ids.insert(graph)
    }

    /// Check if this edge goes FROM a specific vertex
    pub fn starts_from(&self, vertex: VertexId) -> bool {
        self.source == vertex
    }

    /// Check if this edge goes TO a specific vertex
    pub fn ends_at(&self, vertex: VertexId) -> bool {
        self.target == vertex
    }

    pub fn is_incident_to(&self, vertex: VertexId) -> bool {
        self.source == vertex || self.target == vertex
    }
}

impl Labeled for Edge {
    fn label(&self) -> &Label {
        &self.label
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl GraphElement for Edge {
    fn graph_ids(&self) -> &GraphIdSet {
        &self.graph_ids
    }

    fn graph_ids_mut(&mut self) -> &mut GraphIdSet {
        &mut self.graph_ids
    }
}
