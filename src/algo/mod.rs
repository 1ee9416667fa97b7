//! Pluggable graph algorithms
//!
//! `call_for_graph` and `call_for_collection` only depend on the two
//! capability traits below. The adapters in this module run topology
//! algorithms from the `epgm-algorithms` crate and write their results
//! back as properties or new graphs.

pub mod components;
pub mod pagerank;

pub use components::ConnectedComponents;
pub use pagerank::PageRank;

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphCollection, LogicalGraph};
use epgm_algorithms::GraphView;
use std::str::FromStr;

/// Algorithm consuming one logical graph and producing one
pub trait GraphAlgorithm {
    fn name(&self) -> &str;

    fn execute(&self, graph: LogicalGraph, params: &[&str]) -> GraphResult<LogicalGraph>;
}

/// Algorithm consuming a collection and producing a new one
pub trait CollectionAlgorithm {
    fn name(&self) -> &str;

    fn execute(&self, collection: &GraphCollection, params: &[&str]) -> GraphResult<GraphCollection>;
}

/// Build a dense view of one graph's topology for algorithm execution
pub fn build_view(graph: &LogicalGraph) -> GraphView {
    GraphView::from_edges(
        graph.vertices.keys().map(|id| id.as_u64()),
        graph
            .edges
            .values()
            .map(|e| (e.source.as_u64(), e.target.as_u64())),
    )
}

/// Reject parameter lists longer than `max`
pub(crate) fn check_arity(algorithm: &str, params: &[&str], max: usize) -> GraphResult<()> {
    if params.len() > max {
        return Err(GraphError::Algorithm {
            name: algorithm.to_string(),
            message: format!("expected at most {} parameters, got {}", max, params.len()),
        });
    }
    Ok(())
}

/// Parse the parameter at `index`, falling back to `default` when absent
pub(crate) fn parse_param<T: FromStr>(params: &[&str], index: usize, name: &str, default: T) -> GraphResult<T> {
    match params.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| GraphError::invalid_parameter(name, format!("cannot parse '{}'", raw))),
    }
}
