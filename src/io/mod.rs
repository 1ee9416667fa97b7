//! Import and export of graph collections

pub mod json;

pub use json::{EdgeRecord, JsonReader, JsonWriter, VertexRecord};
