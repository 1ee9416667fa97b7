//! Attributes shared by all EPGM entities

use super::property::{PropertyMap, PropertyValue};
use super::types::{GraphId, Label};
use std::collections::BTreeSet;

/// Membership set: the logical graphs a vertex or edge belongs to
pub type GraphIdSet = BTreeSet<GraphId>;

/// Base attribute set of vertices, edges and graph heads: a label and properties
pub trait Labeled {
    fn label(&self) -> &Label;

    fn properties(&self) -> &PropertyMap;

    fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties().get(key)
    }

    fn has_property(&self, key: &str) -> bool {
        self.properties().contains_key(key)
    }

    fn property_count(&self) -> usize {
        self.properties().count()
    }
}

/// An entity that is a member of zero or more logical graphs
pub trait GraphElement: Labeled {
    fn graph_ids(&self) -> &GraphIdSet;

    fn graph_ids_mut(&mut self) -> &mut GraphIdSet;

    fn is_member_of(&self, graph: GraphId) -> bool {
        self.graph_ids().contains(&graph)
    }

    fn graph_count(&self) -> usize {
        self.graph_ids().len()
    }

    /// Keep only memberships accepted by `keep`; returns whether any remain
    fn retain_graphs(&mut self, mut keep: impl FnMut(GraphId) -> bool) -> bool {
        let ids = self.graph_ids_mut();
        ids.retain(|id| keep(*id));
        !ids.is_empty()
    }
}
