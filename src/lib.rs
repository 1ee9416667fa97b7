//! EPGM graph collections
//!
//! Collections of logical property graphs sharing one universe of vertices
//! and edges (the Extended Property Graph Model), with a pure set algebra
//! over them and an id-independent structural equality test.
//!
//! # Architecture
//!
//! - `graph`: property store, vertices, edges, graph heads and the
//!   [`GraphCollection`] container with its membership invariants
//! - `equality`: canonical labels and graph signatures
//! - `algebra`: select, union, intersect, difference, distinct, sort_by,
//!   top, apply, reduce, values and the pluggable algorithm calls
//! - `algo`: algorithm capability traits and adapters over `epgm-algorithms`
//! - `io`: vertex-centric JSON adjacency records
//! - `config`: execution settings and the shared thread pool
//!
//! ## Example Usage
//!
//! ```rust
//! use epgm::graph::{Edge, EdgeId, GraphHead, GraphId, LogicalGraph, Vertex, VertexId};
//! use epgm::GraphCollection;
//!
//! let single_edge = |graph: u64, ids: [u64; 3]| {
//!     LogicalGraph::from_elements(
//!         GraphHead::new(GraphId::new(graph), "Community"),
//!         vec![
//!             Vertex::new(VertexId::new(ids[0]), "Person"),
//!             Vertex::new(VertexId::new(ids[1]), "Person"),
//!         ],
//!         vec![Edge::new(EdgeId::new(ids[2]), VertexId::new(ids[0]), VertexId::new(ids[1]), "knows")],
//!     )
//!     .unwrap()
//! };
//!
//! let collection =
//!     GraphCollection::from_graphs(vec![single_edge(1, [1, 2, 1]), single_edge(2, [3, 4, 2])]).unwrap();
//!
//! // Same shape and content despite disjoint ids
//! let distinct = collection.distinct();
//! assert_eq!(distinct.size(), 1);
//! assert_eq!(distinct.graph_ids(), vec![GraphId::new(1)]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algebra;
pub mod algo;
pub mod config;
pub mod equality;
pub mod error;
pub mod graph;
pub mod io;

// Re-export main types for convenience
pub use algebra::{combine, overlap, GraphPredicate, Order, Values};
pub use algo::{CollectionAlgorithm, ConnectedComponents, GraphAlgorithm, PageRank};
pub use config::{ExecutionConfig, ExecutionEnvironment};
pub use equality::{graph_signature, graphs_equal, GraphSignature};
pub use error::{GraphError, GraphResult};
pub use graph::{
    Edge, EdgeId, GraphCollection, GraphHead, GraphId, Label, LogicalGraph, PropertyMap, PropertyValue, Vertex,
    VertexId,
};
pub use io::{JsonReader, JsonWriter};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
