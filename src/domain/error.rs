//! Error taxonomy shared by the storage accessor and the service layer.

use crate::domain::product::ValidationErrors;
use thiserror::Error;

/// Any failure coming out of the persistence layer.
///
/// Carries a human-readable message naming the operation, plus the underlying cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    cause: StorageCause,
}

#[derive(Debug, Error)]
pub enum StorageCause {
    #[error(transparent)]
    Driver(#[from] sqlx::Error),
    #[error("no rows affected after updating a table")]
    NoRowsAffected,
    #[error("no keys returned after updating a table")]
    NoGeneratedKey,
}

impl StorageError {
    pub fn new(message: impl Into<String>, cause: impl Into<StorageCause>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &StorageCause {
        &self.cause
    }

    /// True when the statement ran but matched no row (update/delete of an unknown id).
    pub fn is_no_rows_affected(&self) -> bool {
        matches!(self.cause, StorageCause::NoRowsAffected)
    }
}

/// Errors surfaced by `ProductService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn storage_error_keeps_message_and_cause() {
        let err = StorageError::new("Failed to delete a product", StorageCause::NoRowsAffected);
        assert_eq!(err.to_string(), "Failed to delete a product");
        assert!(err.is_no_rows_affected());
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("no rows affected after updating a table".to_string())
        );
    }

    #[test]
    fn driver_errors_are_wrapped() {
        let err = StorageError::new("Failed to count products", sqlx::Error::PoolTimedOut);
        assert!(!err.is_no_rows_affected());
        assert!(matches!(err.cause(), StorageCause::Driver(sqlx::Error::PoolTimedOut)));
    }
}
