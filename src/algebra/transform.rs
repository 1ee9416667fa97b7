//! Operators that hand logical graphs to caller-supplied code: `apply`,
//! `reduce` and the pluggable algorithm calls

use crate::algebra::binary::combine;
use crate::algo::{CollectionAlgorithm, GraphAlgorithm};
use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphCollection, GraphId, LogicalGraph};
use tracing::debug;

impl GraphCollection {
    /// Transform every logical graph independently, one output per input.
    ///
    /// Output graphs may reuse or replace their ids; two outputs with the same
    /// id are rejected. An element shared by several graphs must come out of
    /// every graph with the same content, otherwise the result would not be
    /// `f` of each extent and `ConflictingElement` is returned. A declared
    /// order carries over positionally.
    pub fn apply<F>(&self, f: F) -> GraphResult<GraphCollection>
    where
        F: Fn(LogicalGraph) -> LogicalGraph + Sync + Send,
    {
        let graphs: Vec<LogicalGraph> = self.graphs().collect();
        let outputs = self.environment().map(graphs, f);
        let order: Option<Vec<GraphId>> = self
            .is_ordered()
            .then(|| outputs.iter().map(LogicalGraph::id).collect());

        let result = GraphCollection::from_graphs(outputs)?
            .with_environment(self.environment().clone())
            .with_order(order);
        debug!("apply: {} -> {} graphs", self.size(), result.size());
        Ok(result)
    }

    /// Fold all logical graphs into one with `f`.
    ///
    /// `f` must be associative and commutative; the grouping of applications
    /// is unspecified.
    pub fn reduce<F>(&self, f: F) -> GraphResult<LogicalGraph>
    where
        F: Fn(LogicalGraph, LogicalGraph) -> LogicalGraph + Sync + Send,
    {
        let graphs: Vec<LogicalGraph> = self.graphs().collect();
        let reduced = self
            .environment()
            .reduce(graphs, f)
            .ok_or(GraphError::EmptyCollection)?;
        reduced.validate()?;
        debug!(
            "reduce: {} graphs -> {} vertices, {} edges",
            self.size(),
            reduced.vertex_count(),
            reduced.edge_count()
        );
        Ok(reduced)
    }

    /// Run a graph algorithm on the combination of all graphs
    pub fn call_for_graph(&self, algorithm: &dyn GraphAlgorithm, params: &[&str]) -> GraphResult<LogicalGraph> {
        debug!("call_for_graph {} {:?}", algorithm.name(), params);
        let graph = self.reduce(combine)?;
        algorithm.execute(graph, params)
    }

    /// Run a collection algorithm on this collection
    pub fn call_for_collection(
        &self,
        algorithm: &dyn CollectionAlgorithm,
        params: &[&str],
    ) -> GraphResult<GraphCollection> {
        debug!("call_for_collection {} {:?}", algorithm.name(), params);
        let result = algorithm.execute(self, params)?;
        result.validate()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{overlap, Order};
    use crate::graph::{Edge, EdgeId, GraphHead, Labeled, Vertex, VertexId};

    fn g(id: u64) -> GraphId {
        GraphId::new(id)
    }

    fn sample() -> GraphCollection {
        GraphCollection::new(
            vec![
                GraphHead::new(g(1), "A").with_property("rank", 2i64),
                GraphHead::new(g(2), "B").with_property("rank", 1i64),
            ],
            vec![
                Vertex::new(VertexId::new(1), "V").in_graphs([g(1)]),
                Vertex::new(VertexId::new(2), "V").in_graphs([g(1), g(2)]),
                Vertex::new(VertexId::new(3), "V").in_graphs([g(2)]),
            ],
            vec![
                Edge::new(EdgeId::new(1), VertexId::new(1), VertexId::new(2), "e").in_graphs([g(1)]),
                Edge::new(EdgeId::new(2), VertexId::new(2), VertexId::new(3), "e").in_graphs([g(2)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_apply_preserves_cardinality() {
        let c = sample();
        let result = c
            .apply(|mut graph| {
                graph.head.set_property("size", graph.vertex_count() as i64);
                graph
            })
            .unwrap();
        assert_eq!(result.size(), c.size());
        let head = result.graph_head(g(1)).unwrap();
        assert_eq!(head.property("size").and_then(|v| v.as_integer()), Some(2));
    }

    #[test]
    fn test_apply_can_drop_elements() {
        let result = sample()
            .apply(|mut graph| {
                graph.edges.clear();
                graph
            })
            .unwrap();
        assert_eq!(result.edge_count(), 0);
        assert_eq!(result.vertex_count(), 3);
    }

    #[test]
    fn test_apply_keeps_declared_order() {
        let sorted = sample().sort_by("rank", Order::Ascending);
        let result = sorted.apply(|graph| graph).unwrap();
        assert_eq!(result.graph_ids(), vec![g(2), g(1)]);
    }

    #[test]
    fn test_apply_rejects_colliding_ids() {
        let err = sample()
            .apply(|mut graph| {
                graph.head.id = g(9);
                graph
            })
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateGraphHead(id) if id == g(9)));
    }

    #[test]
    fn test_apply_rejects_diverging_shared_vertex() {
        // Vertex 2 is in both graphs and would get 21 from graph 1 and 22 from graph 2
        let err = sample()
            .apply(|mut graph| {
                let tag = graph.vertex_count() as i64 * 10 + graph.id().as_u64() as i64;
                for vertex in graph.vertices.values_mut() {
                    vertex.set_property("tag", tag);
                }
                graph
            })
            .unwrap_err();
        assert!(matches!(err, GraphError::ConflictingElement { graph, .. } if graph == g(2)));
    }

    #[test]
    fn test_apply_matches_transform_of_each_extent() {
        let f = |mut graph: LogicalGraph| {
            for vertex in graph.vertices.values_mut() {
                let id = vertex.id.as_u64() as i64;
                vertex.set_property("tag", id * 10);
            }
            graph.head.set_property("size", graph.vertex_count() as i64);
            graph
        };
        let c = sample();
        let result = c.apply(f).unwrap();
        for id in c.graph_ids() {
            assert_eq!(result.graph(id), Some(f(c.graph(id).unwrap())));
        }
    }

    #[test]
    fn test_reduce() {
        let combined = sample().reduce(combine).unwrap();
        assert_eq!(combined.id(), g(1));
        assert_eq!(combined.vertex_count(), 3);
        assert_eq!(combined.edge_count(), 2);

        let common = sample().reduce(overlap).unwrap();
        assert_eq!(common.vertex_count(), 1);
        assert_eq!(common.edge_count(), 0);
    }

    #[test]
    fn test_reduce_empty_collection() {
        let err = GraphCollection::empty().reduce(combine).unwrap_err();
        assert!(matches!(err, GraphError::EmptyCollection));
    }
}
