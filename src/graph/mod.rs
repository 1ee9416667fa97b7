//! Extended Property Graph Model
//!
//! This module implements the data model:
//! - Typed properties shared by every entity
//! - Vertices and directed edges tagged with the graphs they belong to
//! - Graph heads, the identity records of logical graphs
//! - Graph collections over a shared vertex/edge universe

pub mod collection;
pub mod edge;
pub mod element;
pub mod head;
pub mod logical;
pub mod property;
pub mod types;
pub mod vertex;

// Re-export main types
pub use collection::GraphCollection;
pub use edge::Edge;
pub use element::{GraphElement, GraphIdSet, Labeled};
pub use head::GraphHead;
pub use logical::LogicalGraph;
pub use property::{FromPropertyValue, PropertyMap, PropertyType, PropertyValue};
pub use types::{EdgeId, GraphId, IdGenerator, Label, VertexId};
pub use vertex::Vertex;
