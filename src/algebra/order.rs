//! Ranking operators: `sort_by` and `top`

use crate::graph::{GraphCollection, GraphHead, GraphId, Labeled, PropertyValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Sort direction for [`GraphCollection::sort_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

/// Heads with the key first, by value in `order`; heads without it last.
/// Ties always break by ascending id, independent of `order`.
fn compare_heads(key: &str, order: Order, a: &GraphHead, b: &GraphHead) -> Ordering {
    let by_value = match (a.property(key), b.property(key)) {
        (Some(x), Some(y)) => order.apply(PropertyValue::total_cmp(x, y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_value.then_with(|| a.id.cmp(&b.id))
}

impl GraphCollection {
    /// Declare an order over the graph heads by the value of `key`
    pub fn sort_by(&self, key: &str, order: Order) -> GraphCollection {
        let mut heads: Vec<&GraphHead> = self.heads_map().values().collect();
        heads.sort_by(|a, b| compare_heads(key, order, a, b));
        let ids: Vec<GraphId> = heads.iter().map(|h| h.id).collect();

        debug!("sort_by '{}' {:?}: {} graphs", key, order, ids.len());
        self.clone().with_order(Some(ids))
    }

    /// The first `limit` graphs of the declared order.
    ///
    /// Without a preceding [`sort_by`](Self::sort_by) the graphs taken are
    /// the ones with the smallest ids, which callers should not rely on.
    /// A `limit` of zero or below yields an empty collection.
    pub fn top(&self, limit: i64) -> GraphCollection {
        let take = usize::try_from(limit).unwrap_or(0);
        let ids: Vec<GraphId> = self.graph_ids().into_iter().take(take).collect();
        let heads: BTreeMap<GraphId, GraphHead> = ids
            .iter()
            .filter_map(|id| self.graph_head(*id).map(|h| (*id, h.clone())))
            .collect();

        debug!("top {}: {} -> {} graphs", limit, self.size(), heads.len());
        GraphCollection::from_parts(
            heads,
            self.vertices().cloned(),
            self.edges().cloned(),
            self.is_ordered().then_some(ids),
            self.environment().clone(),
        )
    }
}
