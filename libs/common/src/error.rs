//! Custom error types for the common library
//!
//! Repositories fold every driver failure into [`StoreError`]. Each variant
//! reports one [`ErrorKind`], which is all the HTTP layer needs to pick a
//! status code.

use sqlx::Error as SqlxError;
use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
const INVALID_AUTHORIZATION: &str = "28000";
const INVALID_PASSWORD: &str = "28P01";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Driver-independent classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailure,
    CastFailure,
    DuplicateKey,
    Unauthenticated,
    Forbidden,
    Unknown,
}

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// Password could not be hashed before storage
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// A record broke a field constraint
    #[error("{0}")]
    Validation(String),

    /// A value could not be converted to the column type
    #[error("{0}")]
    Cast(String),

    /// A unique index rejected the write
    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) => ErrorKind::ValidationFailure,
            StoreError::Cast(_) => ErrorKind::CastFailure,
            StoreError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            StoreError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            StoreError::Forbidden(_) => ErrorKind::Forbidden,
            StoreError::Connection(_)
            | StoreError::Query(_)
            | StoreError::Migration(_)
            | StoreError::Configuration(_)
            | StoreError::Hashing(_) => ErrorKind::Unknown,
        }
    }
}

impl From<SqlxError> for StoreError {
    fn from(error: SqlxError) -> Self {
        if let Some(db) = error.as_database_error() {
            let message = db.message().to_owned();
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    let constraint = db.constraint().unwrap_or("unique index");
                    return StoreError::DuplicateKey(format!(
                        "Duplicate key error on {}",
                        constraint
                    ));
                }
                Some(NOT_NULL_VIOLATION) | Some(CHECK_VIOLATION) => {
                    return StoreError::Validation(message);
                }
                Some(INVALID_TEXT_REPRESENTATION) => return StoreError::Cast(message),
                Some(INVALID_AUTHORIZATION) | Some(INVALID_PASSWORD) => {
                    return StoreError::Unauthenticated(message);
                }
                Some(INSUFFICIENT_PRIVILEGE) => return StoreError::Forbidden(message),
                _ => {}
            }
        }

        match error {
            SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) => {
                StoreError::Cast(error.to_string())
            }
            SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Io(_)
            | SqlxError::Tls(_) => StoreError::Connection(error),
            other => StoreError::Query(other),
        }
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
