//! Records, sequences, and scalars: the nodes of a document tree.

use std::fmt;

use chrono::NaiveDate;

use crate::error::ModelResult;
use crate::naming;

/// A leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Date(NaiveDate),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Any value reachable in a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A typed record.
    Record(Record),
    /// An ordered sequence of records or scalars.
    Sequence(Vec<Value>),
    /// A leaf.
    Scalar(Scalar),
    /// Raw key/value data that has not been through the model layer.
    ///
    /// The loader never produces this; a document containing one was built
    /// from unparsed input, and walking it is a programming error.
    Mapping(serde_json::Map<String, serde_json::Value>),
}

impl Value {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Scalar(_) => "scalar",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Scalar(Scalar::Number(n))
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Scalar(Scalar::Date(date))
    }
}

/// A named slot of a record.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Internal (`snake_case`) name.
    pub name: String,
    /// Key used on the wire (`PascalCase`).
    pub wire_name: String,
    pub value: Value,
}

impl Field {
    /// Create a field, deriving the wire name from the internal name.
    ///
    /// Fails with [`InvalidFieldName`](crate::ModelError::InvalidFieldName)
    /// unless the name converts to a wire key and back unchanged (see
    /// [`naming::wire_name`]).
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> ModelResult<Self> {
        let name = name.into();
        let wire_name = naming::wire_name(&name)?;
        Ok(Self {
            name,
            wire_name,
            value: value.into(),
        })
    }

    /// Create a field with an explicit wire name.
    pub fn with_wire_name(
        name: impl Into<String>,
        wire_name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            wire_name: wire_name.into(),
            value: value.into(),
        }
    }
}

/// A typed record: the element of a document.
///
/// Carries an optional document-unique identifier (`@id`), an optional
/// namespace-qualified declared type (`@type`), and its fields in schema
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    id: Option<String>,
    type_name: Option<String>,
    fields: Vec<Field>,
}

impl Record {
    /// An untyped record with no identifier and no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with a declared type.
    pub fn typed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Builder: set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: append or replace a field.
    ///
    /// # Panics
    ///
    /// If `name` is not a valid internal field name. Use [`Record::insert`]
    /// for names that are not known in advance.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Err(err) = self.insert(name, value) {
            panic!("Record::with_field: {err}");
        }
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn set_type_name(&mut self, type_name: Option<String>) {
        self.type_name = type_name;
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    /// Set a field's value.
    ///
    /// An existing field keeps its position and wire name; a new field is
    /// appended, and its name must pass [`naming::wire_name`]. Returns the
    /// previous value, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> ModelResult<Option<Value>> {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => Ok(Some(std::mem::replace(slot, value))),
            None => {
                self.fields.push(Field::new(name, value)?);
                Ok(None)
            }
        }
    }

    /// Append a fully-formed field without checking for an existing name.
    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Clear a field, leaving it declared with a `Null` value.
    ///
    /// Returns the previous value, or `None` if no such field exists.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.get_mut(name)
            .map(|slot| std::mem::replace(slot, Value::Scalar(Scalar::Null)))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name().unwrap_or("(untyped)"))?;
        if let Some(id) = self.id() {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}
