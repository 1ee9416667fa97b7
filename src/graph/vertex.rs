//! Vertex entity

use super::element::{GraphElement, GraphIdSet, Labeled};
use super::property::{PropertyMap, PropertyValue};
use super::types::{GraphId, Label, VertexId};
use serde::{Deserialize, Serialize};

/// A vertex of the shared universe
///
/// Vertices have:
/// - A unique ID
/// - A label (possibly empty)
/// - Properties (key-value pairs)
/// - The set of logical graphs they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,

    pub label: Label,

    pub properties: PropertyMap,

    /// Logical graphs containing this vertex
    pub graph_ids: GraphIdSet,
}

impl Vertex {
    /// Create a vertex without properties or memberships
    pub fn new(id: VertexId, label: impl Into<Label>) -> Self {
        Vertex {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
            graph_ids: GraphIdSet::new(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Builder-style membership setter
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
}

impl Labeled for Vertex {
    fn label(&self) -> &Label {
        &self.label
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl GraphElement for Vertex {
    fn graph_ids(&self) -> &GraphIdSet {
        &self.graph_ids
    }

    fn graph_ids_mut(&mut self) -> &mut GraphIdSet {
        &mut self.graph_ids
    }
}
