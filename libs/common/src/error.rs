//! Error types shared by the storage layer

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors surfaced by the user and task stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// The email address is already registered to another user
    #[error("Email already exists")]
    DuplicateEmail,

    /// Error occurred during query execution
    #[error("Database query error: {0}")]
    Database(#[source] SqlxError),
}

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        // Postgres reports unique-index violations as SQLSTATE 23505; the
        // users.email index is the only unique constraint in the schema.
        if let SqlxError::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::DuplicateEmail;
            }
        }
        StoreError::Database(err)
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
