//! Editor error type.

use crate::validation::ValidationError;

/// Why an editor request was not carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// The save was rejected; the row stays dirty and the store is untouched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request referenced a row that does not exist.
    #[error("no rule row at position {0}")]
    RowNotFound(usize),
}
