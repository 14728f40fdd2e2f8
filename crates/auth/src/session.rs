//! Register / login / current-user operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, RecordId};

use crate::user::{User, UserInput};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterInput> for UserInput {
    fn from(value: RegisterInput) -> Self {
        Self {
            username: value.username,
            email: value.email,
            password: value.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// What a successful register or login hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[async_trait]
pub trait AuthUsecase: Send + Sync {
    async fn register(&self, input: RegisterInput) -> DomainResult<AuthSession>;

    /// Unknown email and wrong password both fail with `DomainError::Unauthorized`.
    async fn login(&self, input: LoginInput) -> DomainResult<AuthSession>;

    async fn current_user(&self, user_id: RecordId) -> DomainResult<User>;
}
