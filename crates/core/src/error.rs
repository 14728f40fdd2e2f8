//! Domain error model.

use thiserror::Error;

/// Result type used across the domain and usecase layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure reported by a usecase.
///
/// The HTTP layer collapses every variant into one server error per
/// operation, so the variants exist for logs and tests rather than clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, zero quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness rule was violated (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credentials were missing or did not match.
    #[error("unauthorized")]
    Unauthorized,

    /// The backing store could not complete the operation.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Anything else that went wrong inside the usecase (hashing, signing).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
