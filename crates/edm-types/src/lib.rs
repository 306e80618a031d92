//! Document model for election data (EDM).
//!
//! Cast vote record reports and election definition documents arrive as
//! trees of typed records. This crate provides the in-memory form of those
//! trees and the means to address and edit values inside them. Every other
//! EDM crate depends on `edm-types`.
//!
//! # Key Types
//!
//! - [`Record`] -- Typed element with optional `@id` and `@type`
//! - [`Value`] / [`Scalar`] -- Field values: records, sequences, leaves
//! - [`Document`] -- Root record plus path-based edits
//! - [`Container`] / [`Key`] -- Borrowed parent and key of a value
//! - [`Path`] / [`Segment`] -- Owned location of a value from the root
//! - [`Namespace`] -- Prefix scoping declared type names

pub mod document;
pub mod error;
pub mod json;
pub mod namespace;
pub mod naming;
pub mod path;
pub mod value;

pub use document::Document;
pub use error::{ModelError, ModelResult};
pub use namespace::{Namespace, CVR_NAMESPACE, EDF_NAMESPACE};
pub use path::{Container, Key, Path, Segment};
pub use value::{Field, Record, Scalar, Value};
