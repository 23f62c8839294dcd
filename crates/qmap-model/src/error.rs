//! Error types for row store operations.

use thiserror::Error;

use crate::record::RowKey;

/// Errors raised when a row store snapshot would break one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two records share the same key.
    #[error("duplicate row key '{key}'")]
    DuplicateKey { key: RowKey },

    /// No record with this key exists in the store.
    #[error("no row with key '{key}'")]
    UnknownKey { key: RowKey },

    /// The field is not part of the store's schema.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// The schema lists the same field name twice.
    #[error("field '{field}' appears more than once in the schema")]
    DuplicateField { field: String },

    /// The field name collides with a name reserved for record bookkeeping.
    #[error("field name '{field}' is reserved")]
    ReservedField { field: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
