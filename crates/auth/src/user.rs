//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

pub type UserUsecase = dyn CrudUsecase<Input = UserInput, Entity = User>;

/// Request payload for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserInput {
    /// Shape checks only; password strength is the hasher's call.
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(DomainError::validation(format!("malformed email address: {email:?}"))),
        }
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A user as clients see it. The password hash never leaves [`UserAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Stored form of a user: the public record plus its credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

impl UserAccount {
    pub fn new(id: RecordId, input: &UserInput, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            user: User {
                id,
                username: input.username.trim().to_string(),
                email: input.normalized_email(),
                created_at: now,
            },
            password_hash,
        }
    }

    pub fn apply(&mut self, input: &UserInput, password_hash: String) {
        self.user.username = input.username.trim().to_string();
        self.user.email = input.normalized_email();
        self.password_hash = password_hash;
    }
}
