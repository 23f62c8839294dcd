//! Error type for rejected edits.

use qmap_model::ModelError;
use qmap_validate::OrderError;
use thiserror::Error;

/// Why an edit was rejected. The session snapshot is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The proposed order failed validation.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The edit names an unknown row or field.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for edit operations.
pub type Result<T> = std::result::Result<T, EditError>;
