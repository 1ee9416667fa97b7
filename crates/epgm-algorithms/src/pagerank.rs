//! PageRank vertex centrality

use super::common::{GraphView, VertexKey};
use rayon::prelude::*;
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop once the summed score change drops below this value
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 20,
            tolerance: 0.0001,
        }
    }
}

/// Calculate PageRank for every vertex of the view.
///
/// Scores start at 1.0; each round is computed in parallel from the previous
/// round's scores only, so the result does not depend on scheduling.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<VertexKey, f64> {
    let n = view.vertex_count;
    if n == 0 {
        return HashMap::new();
    }

    let d = config.damping_factor;
    let base = 1.0 - d;
    let mut scores = vec![1.0; n];

    for _ in 0..config.iterations {
        let next: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                let incoming: f64 = view
                    .predecessors(i)
                    .iter()
                    .map(|&src| scores[src] / view.out_degree(src) as f64)
                    .sum();
                base + d * incoming
            })
            .collect();

        let diff: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;
        if diff < config.tolerance {
            break;
        }
    }

    scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| (view.index_to_key[idx], score))
        .collect()
}
