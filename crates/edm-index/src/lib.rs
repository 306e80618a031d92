//! Identifier and type indexes over election documents.
//!
//! Cast vote record and election definition documents cross-reference their
//! elements by `@id` (a contest selection names its candidates, a candidate
//! names its party). This crate walks a [`Document`](edm_types::Document)
//! once and answers "which element has this id?" and "which elements have
//! this type?" without walking it again.
//!
//! Two projections are provided. [`ElementIndex`] returns the records
//! themselves. [`DocumentIndex`] returns [`IndexNode`] handles carrying the
//! container, key, and path of each record, for callers that need to edit
//! the document around what they found.
//!
//! # Key Types
//!
//! - [`Walk`] -- Depth-first, pre-order traversal with container and key
//! - [`Index`] -- Lookup core, generic over what it stores per record
//! - [`ElementIndex`] -- Index of records
//! - [`DocumentIndex`] / [`IndexNode`] -- Index of location handles
//! - [`IndexError`] -- Strict lookup misses

pub mod document;
pub mod element;
pub mod error;
pub mod index;
pub mod walker;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod properties;

pub use document::{DocumentBuilder, DocumentIndex, IndexNode};
pub use element::{ElementBuilder, ElementIndex};
pub use error::{IndexError, IndexResult};
pub use index::{Index, NodeBuilder, Nodes, Site};
pub use walker::{walk, Step, Walk};
