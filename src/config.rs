//! Execution configuration
//!
//! Every [`GraphCollection`](crate::GraphCollection) carries a shared
//! [`ExecutionEnvironment`]; operators run their data-parallel stages through it.

use crate::error::{GraphError, GraphResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Execution settings for collection operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Worker threads for a dedicated pool (None = rayon's global pool)
    pub parallelism: Option<usize>,
    /// Inputs smaller than this run sequentially
    pub parallel_threshold: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            parallel_threshold: 64,
        }
    }
}

impl ExecutionConfig {
    /// Always run sequentially, on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallelism: Some(1),
            parallel_threshold: usize::MAX,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> GraphResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

/// Runtime handle shared by collections: configuration plus an optional
/// dedicated thread pool.
#[derive(Debug)]
pub struct ExecutionEnvironment {
    config: ExecutionConfig,
    pool: Option<rayon::ThreadPool>,
}

impl ExecutionEnvironment {
    pub fn new(config: ExecutionConfig) -> GraphResult<Self> {
        let pool = match config.parallelism {
            Some(threads) if threads > 1 => {
                debug!("Building dedicated pool with {} threads", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("epgm-worker-{}", i))
                    .build()
                    .map_err(|e| GraphError::Execution(e.to_string()))?;
                Some(pool)
            }
            _ => None,
        };
        Ok(Self { config, pool })
    }

    /// Process-wide default environment
    pub fn shared() -> Arc<ExecutionEnvironment> {
        static DEFAULT: OnceLock<Arc<ExecutionEnvironment>> = OnceLock::new();
        DEFAULT
            .get_or_init(|| {
                Arc::new(ExecutionEnvironment {
                    config: ExecutionConfig::default(),
                    pool: None,
                })
            })
            .clone()
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    fn runs_parallel(&self, len: usize) -> bool {
        self.config.parallelism != Some(1) && len >= self.config.parallel_threshold
    }

    /// Run `op` inside the dedicated pool, if there is one
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Map every item independently; order of the output matches the input
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        if self.runs_parallel(items.len()) {
            self.install(|| items.into_par_iter().map(f).collect())
        } else {
            items.into_iter().map(f).collect()
        }
    }

    /// Fold all items with `f`, which must be associative and commutative:
    /// the grouping of applications is unspecified.
    pub fn reduce<T, F>(&self, items: Vec<T>, f: F) -> Option<T>
    where
        T: Send,
        F: Fn(T, T) -> T + Sync + Send,
    {
        if self.runs_parallel(items.len()) {
            self.install(|| items.into_par_iter().reduce_with(f))
        } else {
            items.into_iter().reduce(f)
        }
    }
}
