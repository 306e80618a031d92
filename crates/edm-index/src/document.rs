//! Document projection: the index stores handles that say where each
//! record lives.
//!
//! An [`IndexNode`] carries the record together with its container and key,
//! so callers can inspect the parent directly, and an owned [`Path`], so they
//! can drop the index and edit the document in place:
//!
//! ```
//! use edm_index::DocumentIndex;
//! use edm_types::{Document, Record, Value};
//!
//! let mut doc = Document::new(Record::new().with_field(
//!     "gp_unit",
//!     vec![
//!         Value::from(Record::typed("CVR.GpUnit").with_id("downtown-precinct")),
//!         Value::from(Record::typed("CVR.GpUnit").with_id("port-precinct")),
//!     ],
//! ));
//! let path = DocumentIndex::new(&doc, "CVR")
//!     .by_id_strict("downtown-precinct")
//!     .unwrap()
//!     .path()
//!     .clone();
//! doc.remove(&path).unwrap();
//! assert_eq!(DocumentIndex::new(&doc, "CVR").len(), 1);
//! ```

use std::fmt;

use edm_types::{Container, Key, Path, Record};

use crate::index::{Index, NodeBuilder, Site};

/// Location and value of one indexed record.
///
/// `container` and `key` are absent only for a record with no parent, which
/// an index built from a document never produces.
#[derive(Clone, Debug)]
pub struct IndexNode<'a> {
    container: Option<Container<'a>>,
    key: Option<Key<'a>>,
    value: &'a Record,
    path: Path,
}

impl<'a> IndexNode<'a> {
    pub fn container(&self) -> Option<Container<'a>> {
        self.container
    }

    pub fn key(&self) -> Option<Key<'a>> {
        self.key
    }

    pub fn value(&self) -> &'a Record {
        self.value
    }

    /// Location of the record from the document root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The record holding this one, directly or through a sequence.
    pub fn parent_record(&self) -> Option<&'a Record> {
        self.container.and_then(|c| c.as_record())
    }
}

impl fmt::Display for IndexNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.value, self.path)
    }
}

/// Builds [`IndexNode`] handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentBuilder;

impl<'a> NodeBuilder<'a> for DocumentBuilder {
    type Node = IndexNode<'a>;

    fn build(&self, site: Site<'a, '_>) -> IndexNode<'a> {
        IndexNode {
            container: site.container,
            key: site.key,
            value: site.record,
            path: Path::from(site.path),
        }
    }
}

/// Index whose lookups return [`IndexNode`] handles.
pub type DocumentIndex<'a> = Index<'a, DocumentBuilder>;
