//! Structural graph equality
//!
//! Two graphs are equal when their canonical signatures match. A signature
//! is built from canonical labels that only look at content (labels and
//! properties), never at ids, so graphs from unrelated id spaces compare
//! equal when they have the same shape and data.
//!
//! This is a single round of label refinement, not an isomorphism test.
//! Each edge is described by the content of its two endpoints, so graphs
//! whose vertices carry identical labels but that differ only in how those
//! vertices are wired beyond one hop (e.g. one 6-cycle vs. two 3-cycles of
//! identical vertices) produce the same signature.

pub mod canonical;

pub use canonical::{edge_label, graph_signature, signature_of, vertex_label, GraphSignature};

use crate::graph::{GraphCollection, GraphId, LogicalGraph};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Structural equality of two detached graphs
pub fn graphs_equal(a: &LogicalGraph, b: &LogicalGraph) -> bool {
    graph_signature(a) == graph_signature(b)
}

/// Signature of every graph of a collection, in the collection's graph order
pub fn collection_signatures(collection: &GraphCollection) -> Vec<(GraphId, GraphSignature)> {
    let ids = collection.graph_ids();
    collection.environment().map(ids, |id| {
        let (vertices, edges) = collection.extent(id).unwrap_or_default();
        (id, signature_of(&vertices, &edges))
    })
}

/// One graph id per equivalence class of equal signatures: the smallest id
pub fn distinct_representatives(collection: &GraphCollection) -> BTreeSet<GraphId> {
    let mut classes: FxHashMap<GraphSignature, GraphId> = FxHashMap::default();
    for (id, signature) in collection_signatures(collection) {
        classes
            .entry(signature)
            .and_modify(|rep| *rep = (*rep).min(id))
            .or_insert(id);
    }
    debug!(
        "Grouped {} graphs into {} equivalence classes",
        collection.size(),
        classes.len()
    );
    classes.into_values().collect()
}
