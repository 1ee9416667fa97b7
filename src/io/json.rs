//! Vertex-centric JSON adjacency records, one per line
//!
//! ```text
//! {"id":1,"label":"Person","properties":{"name":"Alice"},"out-edges":[{"otherid":2,"label":"knows"}],"graphs":[7]}
//! ```
//!
//! Empty `properties`, edge arrays and `graphs` are omitted when writing and
//! read back as empty. Property values are native JSON values; byte
//! sequences are written as arrays of integers and read back as lists.

use crate::error::{GraphError, GraphResult};
use crate::graph::{
    Edge, GraphCollection, GraphHead, GraphIdSet, IdGenerator, Label, PropertyMap, PropertyValue, Vertex,
    VertexId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// One adjacent edge as seen from the record's vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "otherid")]
    pub other_id: VertexId,
    #[serde(default)]
    pub label: Label,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty", with = "native_properties")]
    pub properties: PropertyMap,
}

/// One line of the adjacency format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: VertexId,
    #[serde(default)]
    pub label: Label,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty", with = "native_properties")]
    pub properties: PropertyMap,
    #[serde(rename = "out-edges", default, skip_serializing_if = "Vec::is_empty")]
    pub out_edges: Vec<EdgeRecord>,
    #[serde(rename = "in-edges", default, skip_serializing_if = "Vec::is_empty")]
    pub in_edges: Vec<EdgeRecord>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub graphs: GraphIdSet,
}

impl VertexRecord {
    /// The vertex described by this record, without its adjacency
    pub fn to_vertex(&self) -> Vertex {
        Vertex {
            id: self.id,
            label: self.label.clone(),
            properties: self.properties.clone(),
            graph_ids: self.graphs.clone(),
        }
    }
}

/// Property maps as plain JSON objects, keeping key order
mod native_properties {
    use super::{from_json, to_json};
    use crate::graph::PropertyMap;
    use indexmap::IndexMap;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(properties: &PropertyMap, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(properties.count()))?;
        for (key, value) in properties {
            map.serialize_entry(key, &to_json(value))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PropertyMap, D::Error> {
        let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(k, v)| (k, from_json(v))).collect())
    }
}

/// Native JSON rendering of a property value. Non-finite floats become `null`.
pub fn to_json(value: &PropertyValue) -> serde_json::Value {
    use serde_json::Value;
    match value {
        PropertyValue::Null => Value::Null,
        PropertyValue::Boolean(b) => Value::Bool(*b),
        PropertyValue::Integer(i) => Value::from(*i),
        PropertyValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
        PropertyValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        PropertyValue::Map(entries) => Value::Object(entries.iter().map(|(k, v)| (k.clone(), to_json(v))).collect()),
    }
}

/// Property value of a JSON value. Integers outside `i64` become floats.
pub fn from_json(value: serde_json::Value) -> PropertyValue {
    use serde_json::Value;
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => PropertyValue::Integer(i),
            None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => PropertyValue::String(s),
        Value::Array(items) => PropertyValue::List(items.into_iter().map(from_json).collect()),
        Value::Object(entries) => {
            PropertyValue::Map(entries.into_iter().map(|(k, v)| (k, from_json(v))).collect::<BTreeMap<_, _>>())
        }
    }
}

/// Writes collections as adjacency records.
///
/// Graph heads are not part of the format: only their ids survive, through
/// the `graphs` arrays of the vertices.
#[derive(Debug, Default)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        JsonWriter
    }

    /// Adjacency record of one vertex of `collection`
    pub fn vertex_record(&self, collection: &GraphCollection, vertex: &Vertex) -> VertexRecord {
        let mut out_edges = Vec::new();
        let mut in_edges = Vec::new();
        for edge in collection.incident_edges(vertex.id) {
            if edge.starts_from(vertex.id) {
                out_edges.push(edge_record(edge, edge.target));
            }
            if edge.ends_at(vertex.id) {
                in_edges.push(edge_record(edge, edge.source));
            }
        }
        VertexRecord {
            id: vertex.id,
            label: vertex.label.clone(),
            properties: vertex.properties.clone(),
            out_edges,
            in_edges,
            graphs: vertex.graph_ids.clone(),
        }
    }

    /// Single-line JSON text of a record
    pub fn write_vertex(&self, record: &VertexRecord) -> GraphResult<String> {
        Ok(serde_json::to_string(record)?)
    }

    /// Write one line per vertex; returns the number of records written
    pub fn write_collection<W: Write>(&self, collection: &GraphCollection, mut writer: W) -> GraphResult<usize> {
        let mut written = 0;
        for vertex in collection.vertices() {
            let line = self.write_vertex(&self.vertex_record(collection, vertex))?;
            writeln!(writer, "{}", line)?;
            written += 1;
        }
        writer.flush()?;
        info!(
            "Wrote {} vertex records ({} edges, {} graphs)",
            written,
            collection.edge_count(),
            collection.size()
        );
        Ok(written)
    }

    pub fn write_to_path(&self, collection: &GraphCollection, path: impl AsRef<Path>) -> GraphResult<usize> {
        let file = File::create(path.as_ref())?;
        self.write_collection(collection, BufWriter::new(file))
    }
}

fn edge_record(edge: &Edge, other: VertexId) -> EdgeRecord {
    EdgeRecord {
        other_id: other,
        label: edge.label.clone(),
        properties: edge.properties.clone(),
    }
}

/// Reads adjacency records back into a collection.
///
/// Edges are rebuilt from `out-edges` only; `in-edges` are checked for
/// dangling references. Edge ids are assigned in record order, and every
/// edge belongs to the graphs shared by both of its endpoints. A graph head
/// with an empty label is created for every graph id seen.
#[derive(Debug, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        JsonReader
    }

    pub fn parse_vertex(&self, line: &str) -> GraphResult<VertexRecord> {
        Ok(serde_json::from_str(line)?)
    }

    /// Read records until end of input; blank lines are skipped
    pub fn read_collection<R: BufRead>(&self, reader: R) -> GraphResult<GraphCollection> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(self.parse_vertex(&line)?);
        }
        debug!("Parsed {} vertex records", records.len());
        self.collection_from_records(records)
    }

    pub fn read_from_path(&self, path: impl AsRef<Path>) -> GraphResult<GraphCollection> {
        let file = File::open(path.as_ref())?;
        self.read_collection(BufReader::new(file))
    }

    pub fn collection_from_records(&self, records: Vec<VertexRecord>) -> GraphResult<GraphCollection> {
        let mut vertices: BTreeMap<VertexId, Vertex> = BTreeMap::new();
        for record in &records {
            if vertices.insert(record.id, record.to_vertex()).is_some() {
                return Err(GraphError::DuplicateVertex(record.id));
            }
        }

        let heads: Vec<GraphHead> = records
            .iter()
            .flat_map(|r| r.graphs.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|id| GraphHead::new(id, ""))
            .collect();

        let ids = IdGenerator::default();
        let mut edges = Vec::new();
        for record in &records {
            for adjacent in record.in_edges.iter().chain(&record.out_edges) {
                if !vertices.contains_key(&adjacent.other_id) {
                    return Err(GraphError::DanglingAdjacency {
                        vertex: record.id,
                        other: adjacent.other_id,
                    });
                }
            }
            for out in &record.out_edges {
                let shared: GraphIdSet = vertices[&out.other_id]
                    .graph_ids
                    .intersection(&record.graphs)
                    .copied()
                    .collect();
                let edge = Edge::new(ids.next_edge_id(), record.id, out.other_id, out.label.clone())
                    .with_properties(out.properties.clone())
                    .in_graphs(shared);
                edges.push(edge);
            }
        }

        info!(
            "Read {} vertices, {} edges, {} graphs",
            vertices.len(),
            edges.len(),
            heads.len()
        );
        GraphCollection::new(heads, vertices.into_values(), edges)
    }
}
