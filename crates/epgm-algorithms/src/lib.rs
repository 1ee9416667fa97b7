//! Topology algorithms for EPGM logical graphs
//!
//! Algorithms operate on a dense [`GraphView`] and know nothing about labels,
//! properties or graph membership. The `epgm` crate adapts logical graphs into
//! views and writes results back as properties or new graphs.

pub mod common;
pub mod components;
pub mod pagerank;

pub use common::{GraphView, VertexKey};
pub use components::{weakly_connected_components, ComponentsResult};
pub use pagerank::{page_rank, PageRankConfig};
