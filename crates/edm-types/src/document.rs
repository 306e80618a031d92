//! The document: a root record and everything reachable from it.
//!
//! Reads go through borrowed lookups. Edits address values by [`Path`], so a
//! caller can locate an element through an index, drop the index, and then
//! replace, remove, or relocate the element without walking the tree again.

use std::mem;

use crate::error::{ModelError, ModelResult};
use crate::naming;
use crate::path::{Path, Segment};
use crate::value::{Field, Record, Value};

/// A rooted, ordered tree of records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Record,
}

/// Mutable view of a container reached by a path.
enum SlotMut<'d> {
    Record(&'d mut Record),
    Sequence(&'d mut Vec<Value>),
}

impl Document {
    pub fn new(root: Record) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Record {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Record {
        &mut self.root
    }

    pub fn into_root(self) -> Record {
        self.root
    }

    /// Value stored at `path`. The root itself is not a [`Value`]; use
    /// [`Document::record`] to address it.
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let Segment::Field(name) = first else {
            return None;
        };
        let mut value = self.root.get(name)?;
        for segment in rest {
            value = child(value, segment)?;
        }
        Some(value)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Value> {
        let (first, rest) = path.segments().split_first()?;
        let Segment::Field(name) = first else {
            return None;
        };
        let mut value = self.root.get_mut(name)?;
        for segment in rest {
            value = child_mut(value, segment)?;
        }
        Some(value)
    }

    /// Record stored at `path`; the empty path yields the root.
    pub fn record(&self, path: &Path) -> Option<&Record> {
        if path.is_root() {
            return Some(&self.root);
        }
        self.get(path).and_then(Value::as_record)
    }

    /// Swap the value at `path`, returning the previous one.
    pub fn replace(&mut self, path: &Path, value: Value) -> ModelResult<Value> {
        let (parent, last) = path.split_last().ok_or(ModelError::RootNotAddressable)?;
        match (self.container_mut(&parent)?, last) {
            (SlotMut::Record(record), Segment::Field(name)) => record
                .get_mut(name)
                .map(|slot| mem::replace(slot, value))
                .ok_or_else(|| ModelError::PathNotFound(path.clone())),
            (SlotMut::Sequence(items), Segment::Index(i)) => {
                let len = items.len();
                items
                    .get_mut(*i)
                    .map(|slot| mem::replace(slot, value))
                    .ok_or(ModelError::IndexOutOfBounds { path: parent, index: *i, len })
            }
            _ => Err(ModelError::PathNotFound(path.clone())),
        }
    }

    /// Remove the value at `path` from its container.
    ///
    /// A sequence element is removed and later siblings shift down by one.
    /// A record field stays declared and is left holding `Null`.
    pub fn remove(&mut self, path: &Path) -> ModelResult<Value> {
        let (parent, last) = path.split_last().ok_or(ModelError::RootNotAddressable)?;
        match (self.container_mut(&parent)?, last) {
            (SlotMut::Record(record), Segment::Field(name)) => record
                .take(name)
                .ok_or_else(|| ModelError::PathNotFound(path.clone())),
            (SlotMut::Sequence(items), Segment::Index(i)) => {
                if *i < items.len() {
                    Ok(items.remove(*i))
                } else {
                    Err(ModelError::IndexOutOfBounds { path: parent, index: *i, len: items.len() })
                }
            }
            _ => Err(ModelError::PathNotFound(path.clone())),
        }
    }

    /// Place `value` at `path`.
    ///
    /// In a sequence the value is inserted at the position (which may equal
    /// the length, to append). In a record the field is set, and its
    /// previous value returned. A new field name must pass
    /// [`naming::wire_name`], so the document still serializes and reloads
    /// with the same fields.
    pub fn insert(&mut self, path: &Path, value: Value) -> ModelResult<Option<Value>> {
        self.insert_inner(path, value).map_err(|(err, _)| err)
    }

    /// Move the value at `from` to `to`.
    ///
    /// `to` is resolved after the removal, so positions after `from` in the
    /// same sequence have already shifted. On failure the document is left
    /// as it was.
    pub fn relocate(&mut self, from: &Path, to: &Path) -> ModelResult<()> {
        let value = self.remove(from)?;
        match self.insert_inner(to, value) {
            Ok(_) => Ok(()),
            Err((err, value)) => {
                let restored = self.insert_inner(from, value);
                debug_assert!(restored.is_ok(), "{from} must accept the value just removed from it");
                Err(err)
            }
        }
    }

    fn insert_inner(
        &mut self,
        path: &Path,
        value: Value,
    ) -> Result<Option<Value>, (ModelError, Value)> {
        let Some((parent, last)) = path.split_last() else {
            return Err((ModelError::RootNotAddressable, value));
        };
        let slot = match self.container_mut(&parent) {
            Ok(slot) => slot,
            Err(err) => return Err((err, value)),
        };
        match (slot, last) {
            (SlotMut::Record(record), Segment::Field(name)) => match record.get_mut(name) {
                Some(slot) => Ok(Some(mem::replace(slot, value))),
                None => match naming::wire_name(name) {
                    Ok(wire_name) => {
                        record.push_field(Field::with_wire_name(name.clone(), wire_name, value));
                        Ok(None)
                    }
                    Err(err) => Err((err, value)),
                },
            },
            (SlotMut::Sequence(items), Segment::Index(i)) => {
                if *i <= items.len() {
                    items.insert(*i, value);
                    Ok(None)
                } else {
                    let len = items.len();
                    Err((ModelError::IndexOutOfBounds { path: parent, index: *i, len }, value))
                }
            }
            _ => Err((ModelError::PathNotFound(path.clone()), value)),
        }
    }

    fn container_mut(&mut self, path: &Path) -> ModelResult<SlotMut<'_>> {
        if path.is_root() {
            return Ok(SlotMut::Record(&mut self.root));
        }
        match self.get_mut(path) {
            Some(Value::Record(record)) => Ok(SlotMut::Record(record)),
            Some(Value::Sequence(items)) => Ok(SlotMut::Sequence(items)),
            Some(_) => Err(ModelError::NotAContainer(path.clone())),
            None => Err(ModelError::PathNotFound(path.clone())),
        }
    }
}

impl From<Record> for Document {
    fn from(root: Record) -> Self {
        Self::new(root)
    }
}

fn child<'v>(value: &'v Value, segment: &Segment) -> Option<&'v Value> {
    match (value, segment) {
        (Value::Record(record), Segment::Field(name)) => record.get(name),
        (Value::Sequence(items), Segment::Index(i)) => items.get(*i),
        _ => None,
    }
}

fn child_mut<'v>(value: &'v mut Value, segment: &Segment) -> Option<&'v mut Value> {
    match (value, segment) {
        (Value::Record(record), Segment::Field(name)) => record.get_mut(name),
        (Value::Sequence(items), Segment::Index(i)) => items.get_mut(*i),
        _ => None,
    }
}
