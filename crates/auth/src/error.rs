use thiserror::Error;

use storefront_core::DomainError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<AuthError> for DomainError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::PasswordTooShort { .. } => DomainError::validation(value.to_string()),
            AuthError::Hash(msg) => DomainError::internal(msg),
            AuthError::ExpiryOutOfRange => DomainError::internal(value.to_string()),
            AuthError::NotYetValid | AuthError::Token(_) => DomainError::Unauthorized,
        }
    }
}
