//! PageRank as a graph algorithm
//!
//! Parameters: `[property_key, iterations, damping]`, all optional,
//! defaulting to `pagerank`, 20 and 0.85.

use super::{build_view, check_arity, parse_param, GraphAlgorithm};
use crate::error::{GraphError, GraphResult};
use crate::graph::LogicalGraph;
use epgm_algorithms::{page_rank, PageRankConfig};
use tracing::debug;

pub const DEFAULT_PROPERTY_KEY: &str = "pagerank";

/// Writes each vertex's PageRank score as a float property
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRank;

impl GraphAlgorithm for PageRank {
    fn name(&self) -> &str {
        "PageRank"
    }

    fn execute(&self, mut graph: LogicalGraph, params: &[&str]) -> GraphResult<LogicalGraph> {
        check_arity(self.name(), params, 3)?;
        let key = params.first().copied().unwrap_or(DEFAULT_PROPERTY_KEY);
        if key.is_empty() {
            return Err(GraphError::invalid_parameter("property_key", "must not be empty"));
        }
        let defaults = PageRankConfig::default();
        let config = PageRankConfig {
            iterations: parse_param(params, 1, "iterations", defaults.iterations)?,
            damping_factor: parse_param(params, 2, "damping", defaults.damping_factor)?,
            ..defaults
        };
        if !(0.0..1.0).contains(&config.damping_factor) {
            return Err(GraphError::invalid_parameter(
                "damping",
                format!("{} is outside [0, 1)", config.damping_factor),
            ));
        }

        let view = build_view(&graph);
        let scores = page_rank(&view, config);
        debug!(
            "PageRank over {} vertices, {} edges ({} iterations max)",
            view.vertex_count,
            view.edge_count(),
            config.iterations
        );
        for (id, vertex) in graph.vertices.iter_mut() {
            let score = scores.get(&id.as_u64()).copied().unwrap_or(0.0);
            vertex.set_property(key, score);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeId, GraphHead, GraphId, Labeled, Vertex, VertexId};

    fn star() -> LogicalGraph {
        let vertices = (1..=4).map(|i| Vertex::new(VertexId::new(i), "V"));
        let edges = (2..=4).map(|i| Edge::new(EdgeId::new(i), VertexId::new(i), VertexId::new(1), "e"));
        LogicalGraph::from_elements(GraphHead::new(GraphId::new(1), ""), vertices, edges).unwrap()
    }

    fn score(graph: &LogicalGraph, vertex: u64, key: &str) -> f64 {
        graph.vertices[&VertexId::new(vertex)]
            .property(key)
            .and_then(|v| v.as_float())
            .unwrap()
    }

    #[test]
    fn test_scores_written() {
        let ranked = PageRank.execute(star(), &[]).unwrap();
        assert!(score(&ranked, 1, "pagerank") > score(&ranked, 2, "pagerank"));
        assert_eq!(ranked.edge_count(), 3);
    }

    #[test]
    fn test_custom_parameters() {
        let ranked = PageRank.execute(star(), &["rank", "5", "0.5"]).unwrap();
        assert!(score(&ranked, 1, "rank") > 0.0);
        assert!(ranked.vertices[&VertexId::new(1)].property("pagerank").is_none());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            PageRank.execute(star(), &["rank", "many"]),
            Err(GraphError::InvalidParameter { .. })
        ));
        assert!(matches!(
            PageRank.execute(star(), &["rank", "5", "1.5"]),
            Err(GraphError::InvalidParameter { .. })
        ));
        assert!(matches!(
            PageRank.execute(star(), &["a", "1", "0.5", "extra"]),
            Err(GraphError::Algorithm { .. })
        ));
    }
}
