//! The index core: lookup by `@id` and enumeration by `@type`.
//!
//! An [`Index`] walks a document once, at construction, and keeps two maps:
//! identifier to node, and qualified type name to the nodes of that type in
//! document order. What a "node" is depends on the [`NodeBuilder`] the index
//! is built with; see [`ElementIndex`](crate::ElementIndex) and
//! [`DocumentIndex`](crate::DocumentIndex).
//!
//! The index borrows the document and never changes after construction, so
//! sharing it between readers needs no synchronization. Edits to the
//! document are not reflected; build a new index after editing.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::slice;

use edm_types::{Container, Document, Key, Namespace, Record, Value};
use tracing::{debug, warn};

use crate::error::{IndexError, IndexResult};
use crate::walker::Walk;

/// Where an indexed record was found.
#[derive(Clone, Copy, Debug)]
pub struct Site<'a, 'w> {
    /// Record or sequence holding the record.
    pub container: Option<Container<'a>>,
    /// Field name or position of the record in `container`.
    pub key: Option<Key<'a>>,
    pub record: &'a Record,
    /// Keys from the document root to the record.
    pub path: &'w [Key<'a>],
}

/// Strategy deciding what an index stores for each record.
pub trait NodeBuilder<'a> {
    type Node: Clone;

    fn build(&self, site: Site<'a, '_>) -> Self::Node;
}

/// Nodes of one type, in document order.
///
/// Each call to [`Index::by_type`] starts a fresh sequence.
pub type Nodes<'i, N> = slice::Iter<'i, N>;

/// Identifier and type index over one document.
pub struct Index<'a, B: NodeBuilder<'a>> {
    namespace: Namespace,
    by_id: HashMap<&'a str, B::Node>,
    /// Identifiers in first-encounter order.
    ids: Vec<&'a str>,
    by_type: HashMap<&'a str, Vec<B::Node>>,
    /// Type names in first-encounter order.
    types: Vec<&'a str>,
    duplicates: Vec<&'a str>,
    /// Records carrying an id, a type, or both.
    indexed: usize,
}

impl<'a, B: NodeBuilder<'a>> fmt::Debug for Index<'a, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("namespace", &self.namespace)
            .field("indexed", &self.indexed)
            .field("ids", &self.ids.len())
            .field("types", &self.types.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

impl<'a, B: NodeBuilder<'a> + Default> Index<'a, B> {
    /// Index a document.
    ///
    /// The namespace is required: pass `""` when type names carry no prefix.
    pub fn new(document: &'a Document, namespace: impl Into<Namespace>) -> Self {
        Self::with_builder(document.root(), namespace, B::default())
    }
}

impl<'a, B: NodeBuilder<'a>> Index<'a, B> {
    /// Index everything below `root` using `builder` to make nodes.
    ///
    /// `root` itself is not indexed.
    ///
    /// # Panics
    ///
    /// If the tree contains a [`Value::Mapping`].
    pub fn with_builder(root: &'a Record, namespace: impl Into<Namespace>, builder: B) -> Self {
        let mut index = Self {
            namespace: namespace.into(),
            by_id: HashMap::new(),
            ids: Vec::new(),
            by_type: HashMap::new(),
            types: Vec::new(),
            duplicates: Vec::new(),
            indexed: 0,
        };

        let mut records = 0usize;
        let mut walk = Walk::record(root);
        while let Some(step) = walk.next() {
            let Value::Record(record) = step.value else {
                continue;
            };
            records += 1;
            let (id, type_name) = (record.id(), record.type_name());
            if id.is_none() && type_name.is_none() {
                continue;
            }
            index.indexed += 1;

            let node = builder.build(Site {
                container: step.container,
                key: step.key,
                record,
                path: walk.path(),
            });
            match (id, type_name) {
                (Some(id), Some(type_name)) => {
                    index.add_type(type_name, node.clone());
                    index.add_id(id, node);
                }
                (Some(id), None) => index.add_id(id, node),
                (None, Some(type_name)) => index.add_type(type_name, node),
                (None, None) => {}
            }
        }

        debug!(
            namespace = %index.namespace,
            records,
            indexed = index.indexed,
            ids = index.ids.len(),
            types = index.types.len(),
            "built index"
        );
        index
    }

    fn add_id(&mut self, id: &'a str, node: B::Node) {
        match self.by_id.entry(id) {
            Entry::Occupied(mut slot) => {
                warn!(id, "duplicate '@id' in document; the later element replaces the earlier");
                self.duplicates.push(id);
                slot.insert(node);
            }
            Entry::Vacant(slot) => {
                self.ids.push(id);
                slot.insert(node);
            }
        }
    }

    fn add_type(&mut self, type_name: &'a str, node: B::Node) {
        let bucket = self.by_type.entry(type_name).or_default();
        if bucket.is_empty() {
            self.types.push(type_name);
        }
        bucket.push(node);
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Number of indexed records: those carrying an `@id`, a `@type`, or
    /// both. A record whose id repeats an earlier one still counts.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }

    /// Number of distinct type names.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ---------------------------------------------------------------
    // Identifiers
    // ---------------------------------------------------------------

    /// Every indexed identifier, once each, in first-encounter order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.ids.iter().copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// The node for `id`, or `None` if no element has it.
    ///
    /// When an identifier occurs more than once, the last occurrence in
    /// document order is returned.
    pub fn by_id(&self, id: &str) -> Option<&B::Node> {
        self.by_id.get(id)
    }

    /// Like [`Index::by_id`], but a miss is an error.
    pub fn by_id_strict(&self, id: &str) -> IndexResult<&B::Node> {
        self.by_id(id)
            .ok_or_else(|| IndexError::IdNotFound(id.to_string()))
    }

    /// Identifiers seen more than once while building, in the order the
    /// repeats were found.
    pub fn duplicate_ids(&self) -> &[&'a str] {
        &self.duplicates
    }

    // ---------------------------------------------------------------
    // Types
    // ---------------------------------------------------------------

    /// Every declared type name, once each, in first-encounter order.
    pub fn types(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.types.iter().copied()
    }

    /// Like [`Index::types`], with the `"<namespace>."` prefix removed.
    pub fn types_without_namespace(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.types.iter().map(|name| self.namespace.strip(name))
    }

    /// Nodes whose type is `type_name`, in document order.
    ///
    /// A bare name (no `.`) is qualified with the index namespace first.
    /// Unknown types yield an empty sequence.
    pub fn by_type(&self, type_name: &str) -> Nodes<'_, B::Node> {
        let qualified = self.namespace.qualify(type_name);
        self.by_type
            .get(qualified.as_ref())
            .map_or(&[][..], Vec::as_slice)
            .iter()
    }

    /// Like [`Index::by_type`], but an unknown type is an error.
    pub fn by_type_strict(&self, type_name: &str) -> IndexResult<Nodes<'_, B::Node>> {
        let qualified = self.namespace.qualify(type_name);
        match self.by_type.get(qualified.as_ref()) {
            Some(nodes) => Ok(nodes.iter()),
            None => Err(IndexError::TypeNotFound(qualified.into_owned())),
        }
    }
}
