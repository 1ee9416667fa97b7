//! Typed extraction of graph head property values

use crate::error::{GraphError, GraphResult};
use crate::graph::{FromPropertyValue, GraphCollection, GraphHead, GraphId, Labeled};
use std::marker::PhantomData;
use tracing::trace;

/// Restartable sequence of the `T` values stored under one key of the graph
/// heads. Heads without the key, or whose value has another kind, are skipped.
#[derive(Debug, Clone)]
pub struct Values<'a, T> {
    collection: &'a GraphCollection,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: FromPropertyValue> Values<'a, T> {
    /// Fresh pass over the heads, in graph order
    pub fn iter(&self) -> ValuesIter<'a, T> {
        ValuesIter {
            collection: self.collection,
            key: self.key.clone(),
            ids: self.collection.graph_ids().into_iter(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: FromPropertyValue> IntoIterator for &Values<'a, T> {
    type Item = T;
    type IntoIter = ValuesIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ValuesIter<'a, T> {
    collection: &'a GraphCollection,
    key: String,
    ids: std::vec::IntoIter<GraphId>,
    _marker: PhantomData<fn() -> T>,
}

/// `Ok(None)` when the key is absent
fn extract<T: FromPropertyValue>(head: &GraphHead, key: &str) -> GraphResult<Option<T>> {
    let Some(value) = head.property(key) else {
        return Ok(None);
    };
    T::from_property_value(value)
        .map(Some)
        .ok_or_else(|| GraphError::TypeMismatch {
            key: key.to_string(),
            expected: T::PROPERTY_TYPE,
            found: value.property_type(),
        })
}

impl<'a, T: FromPropertyValue> Iterator for ValuesIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for id in self.ids.by_ref() {
            let Some(head) = self.collection.graph_head(id) else {
                continue;
            };
            match extract::<T>(head, &self.key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(e) => trace!("Skipping {}: {}", id, e),
            }
        }
        None
    }
}

impl GraphCollection {
    /// Values of `key` on the graph heads, as `T`
    pub fn values<T: FromPropertyValue>(&self, key: impl Into<String>) -> Values<'_, T> {
        Values {
            collection: self,
            key: key.into(),
            _marker: PhantomData,
        }
    }
}
