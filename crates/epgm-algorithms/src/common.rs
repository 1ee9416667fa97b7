//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of one graph's topology for algorithm execution.

use std::collections::HashMap;

/// Vertex key as seen by the algorithms (the raw vertex id)
pub type VertexKey = u64;

/// A dense, integer-indexed view of a graph using Compressed Sparse Row (CSR) format.
///
/// Vertex keys are mapped to indices `0..vertex_count`; adjacency is stored as
/// offsets into flat target/source arrays.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of vertices
    pub vertex_count: usize,
    /// Mapping from dense index back to the vertex key
    pub index_to_key: Vec<VertexKey>,
    /// Mapping from vertex key to dense index
    pub key_to_index: HashMap<VertexKey, usize>,
    /// Offsets into `out_targets`. Size = vertex_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target indices
    pub out_targets: Vec<usize>,
    /// Offsets into `in_sources`. Size = vertex_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Build a view from vertex keys and directed `(source, target)` key pairs.
    ///
    /// Pairs referencing keys outside `vertices` are ignored.
    pub fn from_edges(
        vertices: impl IntoIterator<Item = VertexKey>,
        edges: impl IntoIterator<Item = (VertexKey, VertexKey)>,
    ) -> Self {
        let index_to_key: Vec<VertexKey> = vertices.into_iter().collect();
        let key_to_index: HashMap<VertexKey, usize> = index_to_key
            .iter()
            .enumerate()
            .map(|(idx, &key)| (key, idx))
            .collect();
        let vertex_count = index_to_key.len();

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        for (source, target) in edges {
            if let (Some(&s), Some(&t)) = (key_to_index.get(&source), key_to_index.get(&target)) {
                outgoing[s].push(t);
                incoming[t].push(s);
            }
        }

        let (out_offsets, out_targets) = flatten(outgoing);
        let (in_offsets, in_sources) = flatten(incoming);

        GraphView {
            vertex_count,
            index_to_key,
            key_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Get the out-degree of a vertex (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a vertex (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Outgoing neighbours of a vertex
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Incoming neighbours of a vertex
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Total number of directed edges in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }
}

fn flatten(rows: Vec<Vec<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut offsets = Vec::with_capacity(rows.len() + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for row in rows {
        flat.extend(row);
        offsets.push(flat.len());
    }
    (offsets, flat)
}
