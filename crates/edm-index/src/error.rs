//! Error types for the index crate.

/// Lookup misses reported by strict index queries.
///
/// Non-strict queries never produce these; they return `None` or an empty
/// sequence instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// No element carries the requested `@id`.
    #[error("no item in index with '@id': {0}")]
    IdNotFound(String),

    /// No element carries the requested `@type` (namespace-qualified).
    #[error("no items in index with '@type': {0}")]
    TypeNotFound(String),
}

impl IndexError {
    /// The identifier or qualified type name that was looked up.
    pub fn key(&self) -> &str {
        match self {
            Self::IdNotFound(key) | Self::TypeNotFound(key) => key,
        }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
