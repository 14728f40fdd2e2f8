use async_trait::async_trait;
use chrono::Utc;

use storefront_auth::{
    AuthSession, AuthUsecase, LoginInput, RegisterInput, TokenIssuer, User, UserAccount,
};
use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

use crate::store::RecordStore;
use crate::usecases::UserService;

/// Register/login on top of [`UserService`], handing out access tokens.
pub struct AuthService<S> {
    users: UserService<S>,
    tokens: TokenIssuer,
}

impl<S> AuthService<S>
where
    S: RecordStore<UserAccount>,
{
    pub fn new(users: UserService<S>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    fn session_for(&self, user: User) -> DomainResult<AuthSession> {
        let token = self
            .tokens
            .issue(user.id, Utc::now())
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl<S> AuthUsecase for AuthService<S>
where
    S: RecordStore<UserAccount>,
{
    async fn register(&self, input: RegisterInput) -> DomainResult<AuthSession> {
        let user = self.users.create(input.into()).await?;
        self.session_for(user)
    }

    async fn login(&self, input: LoginInput) -> DomainResult<AuthSession> {
        let account = self.users.find_account_by_email(&input.email)?;
        let verified = self.users.verify_login(account.as_ref(), input.password).await?;

        match account {
            Some(account) if verified => self.session_for(account.user),
            Some(account) => {
                tracing::debug!(user_id = %account.user.id, "login with wrong password");
                Err(DomainError::Unauthorized)
            }
            None => {
                tracing::debug!("login for unknown email");
                Err(DomainError::Unauthorized)
            }
        }
    }

    async fn current_user(&self, user_id: RecordId) -> DomainResult<User> {
        self.users.get_by_id(user_id).await
    }
}
