//! Depth-first, pre-order traversal of a document tree.
//!
//! [`Walk`] yields a [`Step`] for every value reachable from its start,
//! together with the container and key used to reach it:
//!
//! - a record yields `(record, field name, field value)` per field, in
//!   declaration order, each followed by the walk of that field value;
//! - a sequence yields `(sequence, position, element)` per element, each
//!   followed by the walk of that element;
//! - a scalar yields `(None, None, scalar)` and stops.
//!
//! The start value itself is only reported when it is a scalar, so a
//! record passed to [`Walk::record`] never appears in its own walk.
//!
//! The order is deterministic for a given tree. Index construction relies
//! on it for first-encounter ordering of identifiers and type buckets.

use edm_types::{Container, Key, Path, Record, Value};

/// One value visited by a [`Walk`].
#[derive(Clone, Copy, Debug)]
pub struct Step<'a> {
    /// Record or sequence holding `value`; `None` for a bare scalar step.
    pub container: Option<Container<'a>>,
    /// Field name or position of `value` in `container`.
    pub key: Option<Key<'a>>,
    pub value: &'a Value,
}

enum Frame<'a> {
    Fields { record: &'a Record, next: usize, depth: usize },
    Items { items: &'a [Value], next: usize, depth: usize },
    Descend { value: &'a Value, depth: usize },
}

/// Lazy iterator over a document tree.
///
/// Besides the steps themselves, the walk tracks the keys leading from the
/// start to the most recently yielded value; see [`Walk::path`].
pub struct Walk<'a> {
    stack: Vec<Frame<'a>>,
    path: Vec<Key<'a>>,
}

impl<'a> Walk<'a> {
    /// Walk everything reachable from `root`.
    pub fn new(root: &'a Value) -> Self {
        Self {
            stack: vec![Frame::Descend { value: root, depth: 0 }],
            path: Vec::new(),
        }
    }

    /// Walk the fields of `root` and everything below them.
    pub fn record(root: &'a Record) -> Self {
        Self {
            stack: vec![Frame::Fields { record: root, next: 0, depth: 0 }],
            path: Vec::new(),
        }
    }

    /// Keys from the start of the walk to the value of the last step.
    pub fn path(&self) -> &[Key<'a>] {
        &self.path
    }

    fn enter(&mut self, depth: usize, key: Key<'a>) {
        self.path.truncate(depth);
        self.path.push(key);
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Step<'a>> {
        loop {
            match self.stack.pop()? {
                Frame::Fields { record, next, depth } => {
                    let Some(field) = record.fields().get(next) else {
                        continue;
                    };
                    self.stack.push(Frame::Fields { record, next: next + 1, depth });
                    self.stack.push(Frame::Descend { value: &field.value, depth: depth + 1 });
                    let key = Key::Field(field.name.as_str());
                    self.enter(depth, key);
                    return Some(Step {
                        container: Some(Container::Record(record)),
                        key: Some(key),
                        value: &field.value,
                    });
                }
                Frame::Items { items, next, depth } => {
                    let Some(item) = items.get(next) else {
                        continue;
                    };
                    self.stack.push(Frame::Items { items, next: next + 1, depth });
                    self.stack.push(Frame::Descend { value: item, depth: depth + 1 });
                    let key = Key::Index(next);
                    self.enter(depth, key);
                    return Some(Step {
                        container: Some(Container::Sequence(items)),
                        key: Some(key),
                        value: item,
                    });
                }
                Frame::Descend { value, depth } => match value {
                    Value::Record(record) => {
                        self.stack.push(Frame::Fields { record, next: 0, depth });
                    }
                    Value::Sequence(items) => {
                        self.stack.push(Frame::Items { items, next: 0, depth });
                    }
                    Value::Scalar(_) => {
                        self.path.truncate(depth);
                        return Some(Step { container: None, key: None, value });
                    }
                    Value::Mapping(map) => {
                        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                        panic!(
                            "untyped mapping at {} with keys {keys:?}: documents must be built \
                             through the model layer, not from raw key/value data",
                            Path::from(&self.path[..depth.min(self.path.len())]),
                        );
                    }
                },
            }
        }
    }
}

/// Walk everything reachable from `root`.
pub fn walk(root: &Value) -> Walk<'_> {
    Walk::new(root)
}
