//! Centralized error handling.
//!
//! Provides a unified error type for the data-access layer. Errors from the
//! host ORM pass through unmodified behind the `Database` variant.

use thiserror::Error;

/// Data-access error types
#[derive(Error, Debug)]
pub enum DataError {
    /// A required input was not provided (e.g. `add(None)`)
    #[error("Required input was not provided: {0}")]
    MissingInput(&'static str),

    /// Lookup matched no entity
    #[error("Resource not found")]
    NotFound,

    /// Field-level constraints failed; message aggregates every failure
    /// found across the staged change set
    #[error("{0}")]
    Validation(String),

    /// Error from the underlying database or query translation
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DataError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DataError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DataError::Internal(msg.into())
    }
}

/// Result type alias
pub type DataResult<T> = Result<T, DataError>;

/// Extension trait for Option -> DataError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> DataResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> DataResult<T> {
        self.ok_or(DataError::NotFound)
    }
}
