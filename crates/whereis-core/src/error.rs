//! Record store errors

use thiserror::Error;

use crate::storage::StorageError;

/// Required fields missing at create or update time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("Name and Description are required!")]
    NameAndDescriptionRequired,
}

/// Errors returned by record store mutations
#[derive(Error, Debug)]
pub enum RecordError {
    /// Input rejected before storage was touched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying key-value store failed
    #[error("Failed to save the record: {0}")]
    Storage(#[from] StorageError),
}

impl RecordError {
    /// Whether the error came from user input rather than storage
    pub fn is_validation(&self) -> bool {
        matches!(self, RecordError::Validation(_))
    }

    /// What the user can do about a storage failure, if anything
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            RecordError::Storage(e) => e.recovery_suggestion(),
            RecordError::Validation(_) => None,
        }
    }
}

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;
