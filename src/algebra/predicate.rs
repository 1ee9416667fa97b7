//! Predicates over graphs, used by `select`

use crate::graph::{GraphCollection, GraphHead, Label, Labeled, LogicalGraph, PropertyValue};
use std::fmt;
use std::sync::Arc;

type HeadFn = Arc<dyn Fn(&GraphHead) -> bool + Send + Sync>;
type ExtentFn = Arc<dyn Fn(&LogicalGraph) -> bool + Send + Sync>;

/// Condition a logical graph must satisfy to survive `select`
#[derive(Clone)]
pub enum GraphPredicate {
    /// Head label equals
    Label(Label),
    /// Head has the property key
    HasProperty(String),
    /// Head property equals the value (structural equality)
    PropertyEquals(String, PropertyValue),
    /// Caller-supplied test on the head alone
    Head(HeadFn),
    /// Caller-supplied test on the whole graph (head plus extent)
    Extent(ExtentFn),
    And(Box<GraphPredicate>, Box<GraphPredicate>),
    Or(Box<GraphPredicate>, Box<GraphPredicate>),
    Not(Box<GraphPredicate>),
}

impl GraphPredicate {
    pub fn label(label: impl Into<Label>) -> Self {
        GraphPredicate::Label(label.into())
    }

    pub fn has_property(key: impl Into<String>) -> Self {
        GraphPredicate::HasProperty(key.into())
    }

    pub fn property_equals(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        GraphPredicate::PropertyEquals(key.into(), value.into())
    }

    pub fn head(f: impl Fn(&GraphHead) -> bool + Send + Sync + 'static) -> Self {
        GraphPredicate::Head(Arc::new(f))
    }

    pub fn extent(f: impl Fn(&LogicalGraph) -> bool + Send + Sync + 'static) -> Self {
        GraphPredicate::Extent(Arc::new(f))
    }

    pub fn and(self, other: GraphPredicate) -> Self {
        GraphPredicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: GraphPredicate) -> Self {
        GraphPredicate::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate against one head of `collection`
    pub fn matches(&self, collection: &GraphCollection, head: &GraphHead) -> bool {
        match self {
            GraphPredicate::Label(label) => head.label() == label,
            GraphPredicate::HasProperty(key) => head.has_property(key),
            GraphPredicate::PropertyEquals(key, value) => head.property(key) == Some(value),
            GraphPredicate::Head(f) => f(head),
            GraphPredicate::Extent(f) => collection.graph(head.id).is_some_and(|g| f(&g)),
            GraphPredicate::And(a, b) => a.matches(collection, head) && b.matches(collection, head),
            GraphPredicate::Or(a, b) => a.matches(collection, head) || b.matches(collection, head),
            GraphPredicate::Not(p) => !p.matches(collection, head),
        }
    }
}

impl std::ops::Not for GraphPredicate {
    type Output = GraphPredicate;

    fn not(self) -> Self::Output {
        GraphPredicate::Not(Box::new(self))
    }
}

impl fmt::Debug for GraphPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphPredicate::Label(label) => write!(f, "Label({})", label),
            GraphPredicate::HasProperty(key) => write!(f, "HasProperty({})", key),
            GraphPredicate::PropertyEquals(key, value) => write!(f, "PropertyEquals({}, {})", key, value),
            GraphPredicate::Head(_) => write!(f, "Head(<fn>)"),
            GraphPredicate::Extent(_) => write!(f, "Extent(<fn>)"),
            GraphPredicate::And(a, b) => write!(f, "And({:?}, {:?})", a, b),
            GraphPredicate::Or(a, b) => write!(f, "Or({:?}, {:?})", a, b),
            GraphPredicate::Not(p) => write!(f, "Not({:?})", p),
        }
    }
}
