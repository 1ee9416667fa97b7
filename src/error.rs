//! Error types for graph collections

use crate::graph::{EdgeId, GraphId, PropertyType, VertexId};
use thiserror::Error;

/// Errors raised at construction/import boundaries and by operators that
/// call into user code (`apply`, `reduce`, pluggable algorithms).
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Referential integrity: edge {edge} references missing vertex {vertex}")]
    ReferentialIntegrity { edge: EdgeId, vertex: VertexId },

    #[error("Referential integrity: adjacency of vertex {vertex} references missing vertex {other}")]
    DanglingAdjacency { vertex: VertexId, other: VertexId },

    #[error("Induced membership: edge {edge} is in {graph} but endpoint {vertex} is not")]
    InducedMembership {
        edge: EdgeId,
        graph: GraphId,
        vertex: VertexId,
    },

    #[error("Element {element} is a member of {graph}, which has no graph head")]
    UnknownGraph { element: String, graph: GraphId },

    #[error("Element {element} in {graph} differs from its copy in another graph")]
    ConflictingElement { element: String, graph: GraphId },

    #[error("Graph head {0} already exists")]
    DuplicateGraphHead(GraphId),

    #[error("Vertex {0} already exists")]
    DuplicateVertex(VertexId),

    #[error("Edge {0} already exists")]
    DuplicateEdge(EdgeId),

    #[error("Cannot reduce an empty graph collection")]
    EmptyCollection,

    #[error("Invalid range: {0}")]
    InvalidRange(i64),

    #[error("Type mismatch for property '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: PropertyType,
        found: PropertyType,
    },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Algorithm {name} failed: {message}")]
    Algorithm { name: String, message: String },

    #[error("Execution environment error: {0}")]
    Execution(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub(crate) fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::ReferentialIntegrity {
            edge: EdgeId::new(3),
            vertex: VertexId::new(9),
        };
        assert_eq!(
            err.to_string(),
            "Referential integrity: edge EdgeId(3) references missing vertex VertexId(9)"
        );
        assert_eq!(
            GraphError::EmptyCollection.to_string(),
            "Cannot reduce an empty graph collection"
        );
        let mismatch = GraphError::TypeMismatch {
            key: "age".to_string(),
            expected: PropertyType::Integer,
            found: PropertyType::String,
        };
        assert_eq!(
            mismatch.to_string(),
            "Type mismatch for property 'age': expected integer, found string"
        );
    }
}
