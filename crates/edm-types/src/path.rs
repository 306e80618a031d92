//! Addressing values inside a document: containers, keys, and paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Record, Value};

/// Borrowed key used to reach a value from its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Field name, when the container is a record.
    Field(&'a str),
    /// Position, when the container is a sequence.
    Index(usize),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A value that holds other values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Container<'a> {
    Record(&'a Record),
    Sequence(&'a [Value]),
}

impl<'a> Container<'a> {
    /// Look up a child. Field keys only match records and index keys only
    /// match sequences.
    pub fn get(&self, key: Key<'_>) -> Option<&'a Value> {
        match (*self, key) {
            (Self::Record(record), Key::Field(name)) => record.get(name),
            (Self::Sequence(items), Key::Index(i)) => items.get(i),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&'a Record> {
        match *self {
            Self::Record(record) => Some(record),
            Self::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&'a [Value]> {
        match *self {
            Self::Sequence(items) => Some(items),
            Self::Record(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
        }
    }
}

/// Owned counterpart of [`Key`], one step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Segment {
    pub fn as_key(&self) -> Key<'_> {
        match self {
            Self::Field(name) => Key::Field(name),
            Self::Index(i) => Key::Index(*i),
        }
    }
}

impl From<Key<'_>> for Segment {
    fn from(key: Key<'_>) -> Self {
        match key {
            Key::Field(name) => Self::Field(name.to_string()),
            Key::Index(i) => Self::Index(i),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_key(), f)
    }
}

/// Location of a value relative to the document root.
///
/// The empty path is the root record itself. Displays as `/cvr/0/cvr_snapshot`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    /// Builder: append a field segment.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Field(name.into()));
        self
    }

    /// Builder: append a sequence position.
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Segment::Index(i));
        self
    }

    /// Path of the containing value, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.split_last().map(|(parent, _)| parent)
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn split_last(&self) -> Option<(Self, &Segment)> {
        self.0
            .split_last()
            .map(|(last, rest)| (Self(rest.to_vec()), last))
    }
}

impl<'a> From<&[Key<'a>]> for Path {
    fn from(keys: &[Key<'a>]) -> Self {
        Self(keys.iter().copied().map(Segment::from).collect())
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
