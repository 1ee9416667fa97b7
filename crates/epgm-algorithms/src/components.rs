//! Weakly connected components

use super::common::{GraphView, VertexKey};
use std::collections::BTreeMap;

/// Result of the weakly connected components computation
#[derive(Debug, Clone, Default)]
pub struct ComponentsResult {
    /// Component members, keyed by the smallest vertex key of the component.
    /// Members are sorted ascending.
    pub components: BTreeMap<VertexKey, Vec<VertexKey>>,
    /// Vertex key -> component key
    pub vertex_component: BTreeMap<VertexKey, VertexKey>,
}

impl ComponentsResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// Union-Find with path compression and union by rank
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Weakly Connected Components (edge direction ignored).
///
/// Component keys are the minimum vertex key of each component, which makes
/// the result independent of the view's index order.
pub fn weakly_connected_components(view: &GraphView) -> ComponentsResult {
    let n = view.vertex_count;
    let mut set = DisjointSet::new(n);
    for u in 0..n {
        for &v in view.successors(u) {
            set.union(u, v);
        }
    }

    let mut by_root: BTreeMap<usize, Vec<VertexKey>> = BTreeMap::new();
    for i in 0..n {
        let root = set.find(i);
        by_root.entry(root).or_default().push(view.index_to_key[i]);
    }

    let mut result = ComponentsResult::default();
    for (_, mut members) in by_root {
        members.sort_unstable();
        let key = members[0];
        for &m in &members {
            result.vertex_component.insert(m, key);
        }
        result.components.insert(key, members);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wcc() {
        // 1->2, 3->4->5, 6 isolated
        let view = GraphView::from_edges(
            vec![1, 2, 3, 4, 5, 6],
            vec![(1, 2), (3, 4), (4, 5)],
        );
        let result = weakly_connected_components(&view);

        assert_eq!(result.component_count(), 3);
        assert_eq!(result.components[&1], vec![1, 2]);
        assert_eq!(result.components[&3], vec![3, 4, 5]);
        assert_eq!(result.components[&6], vec![6]);
        assert_eq!(result.vertex_component[&5], 3);
    }

    #[test]
    fn test_direction_is_ignored() {
        let view = GraphView::from_edges(vec![9, 4], vec![(9, 4)]);
        let result = weakly_connected_components(&view);
        assert_eq!(result.component_count(), 1);
        assert_eq!(result.vertex_component[&9], 4);
    }
}
