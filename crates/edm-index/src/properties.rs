//! Property tests comparing index contents with a direct traversal.

use std::collections::HashSet;

use edm_types::{Document, Field, Record, Value, CVR_NAMESPACE};
use proptest::prelude::*;

use crate::{DocumentIndex, ElementIndex};

const IDS: &[&str] = &["downtown-precinct", "port-precinct", "party-hadron", "ballot-marker-1"];
const TYPES: &[&str] = &["CVR.GpUnit", "CVR.Party", "CVR.Candidate", "CVR.CVRSnapshot"];
const FIELDS: &[&str] = &["gp_unit", "party", "candidate", "cvr_snapshot", "name"];

fn record_with(id: Option<String>, type_name: Option<String>, values: Vec<Value>) -> Record {
    let mut record = Record::new();
    record.set_id(id);
    record.set_type_name(type_name);
    for (name, value) in FIELDS.iter().zip(values) {
        record.push_field(Field::new(*name, value).unwrap());
    }
    record
}

fn arb_attrs() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    (
        prop::option::of(prop::sample::select(IDS).prop_map(str::to_string)),
        prop::option::of(prop::sample::select(TYPES).prop_map(str::to_string)),
    )
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            (arb_attrs(), prop::collection::vec(inner, 0..4)).prop_map(|((id, type_name), values)| {
                Value::from(record_with(id, type_name, values))
            }),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Document> {
    (arb_attrs(), prop::collection::vec(arb_value(), 0..5)).prop_map(|((id, type_name), values)| {
        Document::new(record_with(id, type_name, values))
    })
}

/// Every record below the root, in pre-order.
fn records(doc: &Document) -> Vec<&Record> {
    fn visit<'a>(value: &'a Value, out: &mut Vec<&'a Record>) {
        match value {
            Value::Record(record) => {
                out.push(record);
                for field in record.fields() {
                    visit(&field.value, out);
                }
            }
            Value::Sequence(items) => items.iter().for_each(|item| visit(item, out)),
            Value::Scalar(_) | Value::Mapping(_) => {}
        }
    }
    let mut out = Vec::new();
    for field in doc.root().fields() {
        visit(&field.value, &mut out);
    }
    out
}

fn first_seen<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}

fn ptrs<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<*const Record> {
    records.map(|r| r as *const Record).collect()
}

proptest! {
    #[test]
    fn type_buckets_match_traversal(doc in arb_document()) {
        let all = records(&doc);
        let index = ElementIndex::new(&doc, CVR_NAMESPACE);

        let expected_types = first_seen(all.iter().filter_map(|r| r.type_name()));
        prop_assert_eq!(index.types().collect::<Vec<_>>(), expected_types.clone());

        for name in expected_types {
            let expected = all.iter().copied().filter(|r| r.type_name() == Some(name));
            prop_assert_eq!(ptrs(index.by_type(name).copied()), ptrs(expected));
        }
    }

    #[test]
    fn bare_and_qualified_lookups_agree(doc in arb_document()) {
        let index = ElementIndex::new(&doc, CVR_NAMESPACE);
        for (bare, qualified) in index.types_without_namespace().zip(index.types()) {
            prop_assert_eq!(format!("{CVR_NAMESPACE}.{bare}"), qualified);
            prop_assert_eq!(
                ptrs(index.by_type(bare).copied()),
                ptrs(index.by_type(qualified).copied())
            );
        }
    }

    #[test]
    fn ids_are_unique_and_last_wins(doc in arb_document()) {
        let all = records(&doc);
        let index = ElementIndex::new(&doc, CVR_NAMESPACE);

        let expected_ids = first_seen(all.iter().filter_map(|r| r.id()));
        prop_assert_eq!(index.ids().collect::<Vec<_>>(), expected_ids.clone());

        for id in expected_ids {
            let last = all.iter().rev().find(|r| r.id() == Some(id)).copied();
            prop_assert!(std::ptr::eq(*index.by_id(id).unwrap(), last.unwrap()));
        }
        for id in IDS {
            prop_assert_eq!(index.by_id(id).is_some(), index.by_id_strict(id).is_ok());
        }

        let total = all.iter().filter(|r| r.id().is_some()).count();
        prop_assert_eq!(index.duplicate_ids().len(), total - index.ids().count());
    }

    #[test]
    fn handles_address_their_records(doc in arb_document()) {
        let index = DocumentIndex::new(&doc, CVR_NAMESPACE);
        let nodes = index
            .ids()
            .filter_map(|id| index.by_id(id))
            .chain(index.types().flat_map(|name| index.by_type(name)));
        for node in nodes {
            let container = node.container().unwrap();
            let found = container.get(node.key().unwrap()).and_then(Value::as_record).unwrap();
            prop_assert!(std::ptr::eq(found, node.value()));
            prop_assert!(std::ptr::eq(doc.record(node.path()).unwrap(), node.value()));
        }
    }
}
