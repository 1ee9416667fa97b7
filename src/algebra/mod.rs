//! Collection algebra
//!
//! Every operator takes its inputs by reference and returns a new
//! [`GraphCollection`]; inputs are never mutated. Operators that change the
//! set of graph heads re-project element memberships onto the surviving
//! heads and drop elements left without any membership, so the collection
//! invariants hold on every output.
//!
//! Aggregations never depend on processing order: `distinct` keeps the
//! smallest id of each class, `sort_by` breaks ties by ascending id and
//! `reduce` requires an associative, commutative combinator.

pub mod binary;
pub mod order;
pub mod predicate;
pub mod transform;
pub mod values;

pub use binary::{combine, overlap};
pub use order::Order;
pub use predicate::GraphPredicate;
pub use values::{Values, ValuesIter};

use crate::equality::{collection_signatures, distinct_representatives, GraphSignature};
use crate::graph::{GraphCollection, GraphElement, GraphHead, GraphId};
use std::collections::BTreeMap;
use tracing::debug;

/// Merge two id-keyed element maps: content from `primary`, memberships united
fn merge_elements<K, T>(primary: &BTreeMap<K, T>, secondary: &BTreeMap<K, T>) -> Vec<T>
where
    K: Ord,
    T: GraphElement + Clone,
{
    let mut merged: BTreeMap<&K, T> = primary.iter().map(|(k, v)| (k, v.clone())).collect();
    for (key, element) in secondary {
        match merged.get_mut(key) {
            Some(existing) => existing.graph_ids_mut().extend(element.graph_ids().iter().copied()),
            None => {
                merged.insert(key, element.clone());
            }
        }
    }
    merged.into_values().collect()
}

impl GraphCollection {
    /// Keep the graphs satisfying `predicate`
    pub fn select(&self, predicate: &GraphPredicate) -> GraphCollection {
        let candidates: Vec<&GraphHead> = self.heads_map().values().collect();
        let kept: BTreeMap<GraphId, GraphHead> = self
            .environment()
            .map(candidates, |head| predicate.matches(self, head).then(|| head.clone()))
            .into_iter()
            .flatten()
            .map(|head| (head.id, head))
            .collect();

        debug!("select {:?}: {} -> {} graphs", predicate, self.size(), kept.len());
        GraphCollection::from_parts(
            kept,
            self.vertices().cloned(),
            self.edges().cloned(),
            self.declared_order().map(<[GraphId]>::to_vec),
            self.environment().clone(),
        )
    }

    /// Graphs of either collection; elements keep the union of their memberships
    pub fn union(&self, other: &GraphCollection) -> GraphCollection {
        let mut heads = self.heads_map().clone();
        for (id, head) in other.heads_map() {
            heads.entry(*id).or_insert_with(|| head.clone());
        }
        let result = self.combine_with(other, heads);
        debug!("union: {} + {} -> {} graphs", self.size(), other.size(), result.size());
        result
    }

    /// Graphs whose id appears in both collections
    pub fn intersect(&self, other: &GraphCollection) -> GraphCollection {
        let heads: BTreeMap<GraphId, GraphHead> = self
            .heads_map()
            .iter()
            .filter(|(id, _)| other.contains_graph(**id))
            .map(|(id, head)| (*id, head.clone()))
            .collect();
        let result = self.combine_with(other, heads);
        debug!("intersect: {} & {} -> {} graphs", self.size(), other.size(), result.size());
        result
    }

    /// Graphs of this collection whose id does not appear in `other`, keeping
    /// any declared order
    pub fn difference(&self, other: &GraphCollection) -> GraphCollection {
        let heads: BTreeMap<GraphId, GraphHead> = self
            .heads_map()
            .iter()
            .filter(|(id, _)| !other.contains_graph(**id))
            .map(|(id, head)| (*id, head.clone()))
            .collect();
        debug!("difference: {} - {} -> {} graphs", self.size(), other.size(), heads.len());
        GraphCollection::from_parts(
            heads,
            self.vertices().cloned(),
            self.edges().cloned(),
            self.declared_order().map(<[GraphId]>::to_vec),
            self.environment().clone(),
        )
    }

    fn combine_with(&self, other: &GraphCollection, heads: BTreeMap<GraphId, GraphHead>) -> GraphCollection {
        GraphCollection::from_parts(
            heads,
            merge_elements(self.vertex_map(), other.vertex_map()),
            merge_elements(self.edge_map(), other.edge_map()),
            None,
            self.environment().clone(),
        )
    }

    /// One graph per class of structurally equal graphs, the one with the
    /// smallest id
    pub fn distinct(&self) -> GraphCollection {
        let keep = distinct_representatives(self);
        let heads: BTreeMap<GraphId, GraphHead> = self
            .heads_map()
            .iter()
            .filter(|(id, _)| keep.contains(id))
            .map(|(id, head)| (*id, head.clone()))
            .collect();
        debug!("distinct: {} -> {} graphs", self.size(), heads.len());
        GraphCollection::from_parts(
            heads,
            self.vertices().cloned(),
            self.edges().cloned(),
            self.declared_order().map(<[GraphId]>::to_vec),
            self.environment().clone(),
        )
    }

    /// Same set of graph ids
    pub fn equals_by_graph_ids(&self, other: &GraphCollection) -> bool {
        self.heads_map().keys().eq(other.heads_map().keys())
    }

    /// Same multiset of graph signatures, ids ignored
    pub fn equals_by_graph_data(&self, other: &GraphCollection) -> bool {
        if self.size() != other.size() {
            return false;
        }
        let sorted = |c: &GraphCollection| {
            let mut sigs: Vec<GraphSignature> = collection_signatures(c).into_iter().map(|(_, s)| s).collect();
            sigs.sort_unstable();
            sigs
        };
        sorted(self) == sorted(other)
    }
}
