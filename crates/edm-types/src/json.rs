//! Conversion between wire JSON and the document model.
//!
//! Every JSON object becomes a [`Record`]: `@id` and `@type` are lifted into
//! the record's attributes and the remaining keys become fields under their
//! internal names. Raw [`Value::Mapping`] is never produced here.

use serde_json::{Map, Number, Value as Json};
use tracing::debug;

use crate::document::Document;
use crate::error::{ModelError, ModelResult};
use crate::naming;
use crate::value::{Field, Record, Scalar, Value};

const ID_KEY: &str = "@id";
const TYPE_KEY: &str = "@type";

impl Document {
    /// Build a document from parsed wire JSON. The root must be an object.
    pub fn from_json(json: &Json) -> ModelResult<Self> {
        let Json::Object(map) = json else {
            return Err(ModelError::InvalidDocument(format!(
                "root must be an object, found {}",
                json_kind(json)
            )));
        };
        let mut records = 0usize;
        let root = record_from_json(map, &mut records)?;
        debug!(records, root = %root, "loaded document");
        Ok(Self::new(root))
    }

    /// Parse wire JSON text into a document.
    pub fn from_json_str(text: &str) -> ModelResult<Self> {
        let json: Json =
            serde_json::from_str(text).map_err(|e| ModelError::Serialization(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Wire JSON for the whole document.
    pub fn to_json(&self) -> Json {
        self.root().to_json()
    }
}

impl Record {
    /// Wire JSON for this record: `@id`, `@type`, then fields by wire name.
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        if let Some(id) = self.id() {
            map.insert(ID_KEY.to_string(), Json::String(id.to_string()));
        }
        if let Some(type_name) = self.type_name() {
            map.insert(TYPE_KEY.to_string(), Json::String(type_name.to_string()));
        }
        for field in self.fields() {
            map.insert(field.wire_name.clone(), field.value.to_json());
        }
        Json::Object(map)
    }
}

impl Value {
    pub fn to_json(&self) -> Json {
        match self {
            Self::Record(record) => record.to_json(),
            Self::Sequence(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Scalar(scalar) => scalar.to_json(),
            Self::Mapping(map) => Json::Object(map.clone()),
        }
    }
}

impl Scalar {
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Integer(n) => Json::Number((*n).into()),
            // Non-finite numbers have no JSON form.
            Self::Number(n) => Number::from_f64(*n).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s.clone()),
            Self::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

fn record_from_json(map: &Map<String, Json>, records: &mut usize) -> ModelResult<Record> {
    *records += 1;
    let mut record = Record::new();
    for (key, json) in map {
        match key.as_str() {
            ID_KEY => record.set_id(Some(attribute(key, json)?)),
            TYPE_KEY => record.set_type_name(Some(attribute(key, json)?)),
            _ => {
                let name = naming::to_internal(key)?;
                let value = value_from_json(json, records)?;
                record.push_field(Field::with_wire_name(name, key.clone(), value));
            }
        }
    }
    Ok(record)
}

fn value_from_json(json: &Json, records: &mut usize) -> ModelResult<Value> {
    Ok(match json {
        Json::Null => Value::Scalar(Scalar::Null),
        Json::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
        Json::Number(n) => Value::Scalar(match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Number(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Json::String(s) => Value::Scalar(Scalar::String(s.clone())),
        Json::Array(items) => Value::Sequence(
            items
                .iter()
                .map(|item| value_from_json(item, records))
                .collect::<ModelResult<_>>()?,
        ),
        Json::Object(map) => Value::Record(record_from_json(map, records)?),
    })
}

fn attribute(name: &str, json: &Json) -> ModelResult<String> {
    match json {
        Json::String(s) => Ok(s.clone()),
        other => Err(ModelError::InvalidAttribute {
            name: name.to_string(),
            reason: format!("expected a string, found {}", json_kind(other)),
        }),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
