//! Property values and property maps for vertices, edges and graph heads

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

/// Property value: a closed set of primitive and composite kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

/// Discriminant of a [`PropertyValue`], used for typed extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Bytes,
    List,
    Map,
}

impl PropertyType {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Null => "null",
            PropertyType::Boolean => "boolean",
            PropertyType::Integer => "integer",
            PropertyType::Float => "float",
            PropertyType::String => "string",
            PropertyType::Bytes => "bytes",
            PropertyType::List => "list",
            PropertyType::Map => "map",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Null => PropertyType::Null,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Bytes(_) => PropertyType::Bytes,
            PropertyValue::List(_) => PropertyType::List,
            PropertyValue::Map(_) => PropertyType::Map,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropertyValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Id-independent, deterministic rendering as `type:value`.
    ///
    /// Strings are length-prefixed (`5#Alice`) so that no value can forge a
    /// separator. Floats render their bit pattern with `-0.0` folded into `0.0`.
    pub fn canonical_form(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        out.push_str(self.property_type().name());
        out.push(':');
        match self {
            PropertyValue::Null => {}
            PropertyValue::Boolean(b) => {
                let _ = write!(out, "{}", b);
            }
            PropertyValue::Integer(i) => {
                let _ = write!(out, "{}", i);
            }
            PropertyValue::Float(f) => {
                let normalized = if *f == 0.0 { 0.0f64 } else { *f };
                let _ = write!(out, "{:016x}", normalized.to_bits());
            }
            PropertyValue::String(s) => write_token(out, s),
            PropertyValue::Bytes(bytes) => {
                for b in bytes {
                    let _ = write!(out, "{:02x}", b);
                }
            }
            PropertyValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_canonical(out);
                }
                out.push(']');
            }
            PropertyValue::Map(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_token(out, key);
                    out.push('=');
                    value.write_canonical(out);
                }
                out.push('}');
            }
        }
    }

    /// Total order across all kinds, used for sorting.
    ///
    /// Kinds rank `null < boolean < number < string < bytes < list < map`;
    /// integers and floats compare numerically with each other.
    pub fn total_cmp(&self, other: &PropertyValue) -> Ordering {
        use PropertyValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            (Bytes(a), Bytes(b)) => a.cmp(b),
            (List(a), List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.total_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Map(a), Map(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b) {
                    let ord = ka.cmp(kb).then_with(|| va.total_cmp(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            PropertyValue::Null => 0,
            PropertyValue::Boolean(_) => 1,
            PropertyValue::Integer(_) | PropertyValue::Float(_) => 2,
            PropertyValue::String(_) => 3,
            PropertyValue::Bytes(_) => 4,
            PropertyValue::List(_) => 5,
            PropertyValue::Map(_) => 6,
        }
    }
}

fn write_token(out: &mut String, s: &str) {
    let _ = write!(out, "{}#{}", s.len(), s);
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            PropertyValue::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            PropertyValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(bytes: Vec<u8>) -> Self {
        PropertyValue::Bytes(bytes)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::List(items)
    }
}

impl From<BTreeMap<String, PropertyValue>> for PropertyValue {
    fn from(map: BTreeMap<String, PropertyValue>) -> Self {
        PropertyValue::Map(map)
    }
}

/// Rust types that can be extracted from a [`PropertyValue`] of one kind
pub trait FromPropertyValue: Sized {
    /// Kind a stored value must have to be extracted as `Self`
    const PROPERTY_TYPE: PropertyType;

    fn from_property_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! impl_from_property_value {
    ($ty:ty, $kind:ident, $value:ident => $extract:expr) => {
        impl FromPropertyValue for $ty {
            const PROPERTY_TYPE: PropertyType = PropertyType::$kind;

            fn from_property_value($value: &PropertyValue) -> Option<Self> {
                $extract
            }
        }
    };
}

impl_from_property_value!(bool, Boolean, v => v.as_boolean());
impl_from_property_value!(i64, Integer, v => v.as_integer());
impl_from_property_value!(f64, Float, v => v.as_float());
impl_from_property_value!(String, String, v => v.as_string().map(str::to_string));
impl_from_property_value!(Vec<u8>, Bytes, v => v.as_bytes().map(<[u8]>::to_vec));
impl_from_property_value!(Vec<PropertyValue>, List, v => v.as_list().map(<[PropertyValue]>::to_vec));
impl_from_property_value!(BTreeMap<String, PropertyValue>, Map, v => v.as_map().cloned());

/// Key/value store attached to every vertex, edge and graph head.
///
/// Iteration follows insertion order. Equality is structural: two maps with
/// the same entries are equal whatever order they were built in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(IndexMap<String, PropertyValue>);

impl PropertyMap {
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Copy of this map with `key` set to `value`; `self` is left untouched
    pub fn with(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> PropertyMap {
        let mut next = self.clone();
        next.set(key, value);
        next
    }

    /// Set a value in place, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the insertion order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.shift_remove(key)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys sorted ascending, each rendered `key:type:value`, comma separated
    /// inside braces. Only used for signatures, never for storage order.
    ///
    /// Keys and string values are written length-prefixed (`4#name`) instead
    /// of bare, so `{1#x:integer:1}` rather than `{x:integer:1}`. A bare
    /// rendering would let a key or string containing `:` or `,` spell out
    /// further entries, and two different maps could share one form.
    pub fn canonical_form(&self) -> String {
        let mut entries: Vec<(&String, &PropertyValue)> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = String::from("{");
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_token(&mut out, key);
            out.push(':');
            value.write_canonical(&mut out);
        }
        out.push('}');
        out
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
