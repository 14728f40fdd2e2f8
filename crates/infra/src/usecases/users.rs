use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::Utc;

use storefront_auth::{PasswordHasher, User, UserAccount, UserInput, normalize_email};
use storefront_core::{CrudUsecase, DomainError, DomainResult, RecordId};

use crate::store::{RecordStore, StoreError};

/// User accounts. Passwords are hashed off the async runtime.
#[derive(Clone)]
pub struct UserService<S> {
    store: S,
    hasher: PasswordHasher,
    dummy_hash: Arc<OnceLock<String>>,
}

impl<S> UserService<S>
where
    S: RecordStore<UserAccount>,
{
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn find_account_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
        let email = normalize_email(email);
        Ok(self.store.find(&|a: &UserAccount| a.user.email == email)?)
    }

    async fn verify_password(&self, account: &UserAccount, password: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        let hash = account.password_hash.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("password verification task failed: {e}")))?
            .map_err(DomainError::from)
    }

    /// Check a login attempt. A missing account is verified against a dummy
    /// hash so it takes as long as a wrong password, then reports `false`.
    pub async fn verify_login(&self, account: Option<&UserAccount>, password: String) -> DomainResult<bool> {
        if let Some(account) = account {
            return self.verify_password(account, password).await;
        }

        let hasher = self.hasher.clone();
        let dummy = Arc::clone(&self.dummy_hash);
        tokio::task::spawn_blocking(move || {
            let hash = match dummy.get() {
                Some(hash) => hash.clone(),
                None => {
                    let hash = hasher.dummy_hash()?;
                    dummy.get_or_init(|| hash).clone()
                }
            };
            hasher.verify(&password, &hash).map(|_| false)
        })
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {e}")))?
        .map_err(DomainError::from)
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {e}")))?
            .map_err(DomainError::from)
    }
}

fn email_taken(email: &str, err: StoreError) -> DomainError {
    match err {
        StoreError::Conflict(_) => DomainError::conflict(format!("email {email} is already registered")),
        other => other.into(),
    }
}

#[async_trait]
impl<S> CrudUsecase for UserService<S>
where
    S: RecordStore<UserAccount>,
{
    type Input = UserInput;
    type Entity = User;

    async fn create(&self, input: UserInput) -> DomainResult<User> {
        input.validate()?;
        let hash = self.hash_password(input.password.clone()).await?;
        let id = self.store.next_id()?;
        let account = UserAccount::new(id, &input, hash, Utc::now());
        let email = account.user.email.clone();

        self.store
            .insert_unless(id, account.clone(), &|a: &UserAccount| a.user.email == email)
            .map_err(|e| email_taken(&email, e))?;

        tracing::info!(user_id = %id, "user created");
        Ok(account.user)
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.store.list()?.into_iter().map(|a| a.user).collect())
    }

    async fn get_by_id(&self, id: RecordId) -> DomainResult<User> {
        self.store
            .get(id)?
            .map(|a| a.user)
            .ok_or(DomainError::NotFound)
    }

    async fn update(&self, id: RecordId, input: UserInput) -> DomainResult<User> {
        input.validate()?;
        let mut account = self.store.get(id)?.ok_or(DomainError::NotFound)?;
        let hash = self.hash_password(input.password.clone()).await?;
        account.apply(&input, hash);
        let email = account.user.email.clone();

        self.store
            .replace_unless(id, account.clone(), &|a: &UserAccount| a.user.email == email)
            .map_err(|e| email_taken(&email, e))?
            .ok_or(DomainError::NotFound)?;

        Ok(account.user)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.store.remove(id)?.ok_or(DomainError::NotFound)?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
