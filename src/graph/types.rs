//! Core identifier and label types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

define_id!(
    /// Identity of one logical graph (the id of its [`GraphHead`](super::GraphHead))
    GraphId
);

define_id!(
    /// Unique identifier for a vertex
    VertexId
);

define_id!(
    /// Unique identifier for an edge
    EdgeId
);

/// Label of a vertex, edge or graph head. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}

/// Hands out fresh identifiers past a given watermark.
///
/// Ids are never reused: the generator only moves forward. Shared across
/// threads by reference.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Generator whose first id is `watermark + 1`
    pub fn starting_after(watermark: u64) -> Self {
        IdGenerator {
            next: AtomicU64::new(watermark.saturating_add(1)),
        }
    }

    fn next_raw(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next_graph_id(&self) -> GraphId {
        GraphId(self.next_raw())
    }

    pub fn next_vertex_id(&self) -> VertexId {
        VertexId(self.next_raw())
    }

    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId(self.next_raw())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_after(0)
    }
}
