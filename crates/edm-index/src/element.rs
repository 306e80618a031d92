//! Element projection: the index stores the records themselves.

use edm_types::Record;

use crate::index::{Index, NodeBuilder, Site};

/// Builds nodes that are plain references to the indexed records.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementBuilder;

impl<'a> NodeBuilder<'a> for ElementBuilder {
    type Node = &'a Record;

    fn build(&self, site: Site<'a, '_>) -> &'a Record {
        site.record
    }
}

/// Index whose lookups return the matching records.
///
/// ```
/// use edm_index::ElementIndex;
/// use edm_types::{Document, Record, Value};
///
/// let doc = Document::new(Record::typed("CVR.CastVoteRecordReport").with_field(
///     "gp_unit",
///     vec![Value::from(Record::typed("CVR.GpUnit").with_id("downtown-precinct"))],
/// ));
/// let index = ElementIndex::new(&doc, "CVR");
/// let unit = index.by_id("downtown-precinct").unwrap();
/// assert_eq!(unit.type_name(), Some("CVR.GpUnit"));
/// ```
pub type ElementIndex<'a> = Index<'a, ElementBuilder>;
