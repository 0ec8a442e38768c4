//! Storage boundary errors.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error reported by a store implementation.
///
/// Constraint violations are inspected and classified here so the API layer
/// can map them to its taxonomy without parsing backend error strings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// A unique constraint was violated (e.g. duplicate CPF or email).
    #[error("duplicate value for unique field '{0}'")]
    UniqueViolation(&'static str),

    /// Anything the backend reported that is not a domain condition.
    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Classify a sqlx error, folding unique violations (SQLSTATE 23505)
    /// into [`StoreError::UniqueViolation`].
    pub fn from_sqlx(err: sqlx::Error, unique_field: &'static str) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            if db.code().as_deref() == Some("23505") {
                return StoreError::UniqueViolation(unique_field);
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        StoreError::Backend(err.into())
    }
}
