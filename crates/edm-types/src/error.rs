use thiserror::Error;

use crate::path::Path;

/// Errors produced by document model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Nothing is stored at the given path.
    #[error("path not found in document: {0}")]
    PathNotFound(Path),

    /// The path goes through a value that is neither a record nor a sequence.
    #[error("value at {0} is not a container")]
    NotAContainer(Path),

    /// A sequence position past the end of the sequence.
    #[error("index {index} out of bounds at {path} (length {len})")]
    IndexOutOfBounds { path: Path, index: usize, len: usize },

    /// The empty path names the root record, which cannot be moved or removed.
    #[error("the document root cannot be replaced or removed")]
    RootNotAddressable,

    /// A wire or internal field name that does not follow the naming convention.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    /// An `@`-prefixed attribute with the wrong JSON type.
    #[error("invalid attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// The input is not a document (for example, the root is not an object).
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for model results.
pub type ModelResult<T> = Result<T, ModelError>;
