//! Graph head: identity and metadata of one logical graph

use super::element::Labeled;
use super::property::{PropertyMap, PropertyValue};
use super::types::{GraphId, Label};
use serde::{Deserialize, Serialize};

/// The identity record of a logical graph.
///
/// A graph head is not itself a member of any graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphHead {
    pub id: GraphId,

    pub label: Label,

    pub properties: PropertyMap,
}

impl GraphHead {
    pub fn new(id: GraphId, label: impl Into<Label>) -> Self {
        GraphHead {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
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

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.set(key, value)
    }
}

impl Labeled for GraphHead {
    fn label(&self) -> &Label {
        &self.label
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}
