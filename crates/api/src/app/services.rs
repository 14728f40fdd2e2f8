//! Dependency wiring: stores → usecases → the handles the router needs.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use storefront_auth::{AuthUsecase, PasswordHasher, TokenIssuer, UserAccount, UserUsecase};
use storefront_infra::store::InMemoryRecordStore;
use storefront_infra::usecases::{
    AuthService, PostService, ProductService, PurchaseService, UserService,
};
use storefront_infra::AppConfig;
use storefront_posts::{Post, PostUsecase};
use storefront_products::{Product, ProductUsecase};
use storefront_purchasing::{Purchase, PurchaseUsecase};

/// One usecase per resource, plus the token issuer the auth middleware checks
/// against.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductUsecase>,
    pub purchases: Arc<PurchaseUsecase>,
    pub users: Arc<UserUsecase>,
    pub posts: Arc<PostUsecase>,
    pub auth: Arc<dyn AuthUsecase>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppServices {
    /// Wire every usecase over process-local in-memory stores.
    pub fn in_memory(config: &AppConfig) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(config.password_min_length)
            .with_cost(config.password_hash_memory_kib, config.password_hash_iterations)
            .context("invalid password hashing parameters")?;
        let tokens = TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            Duration::minutes(config.jwt_ttl_minutes),
        );

        let product_store: Arc<InMemoryRecordStore<Product>> = Arc::new(InMemoryRecordStore::new());
        let user_store: Arc<InMemoryRecordStore<UserAccount>> = Arc::new(InMemoryRecordStore::new());
        let purchase_store: Arc<InMemoryRecordStore<Purchase>> = Arc::new(InMemoryRecordStore::new());
        let post_store: Arc<InMemoryRecordStore<Post>> = Arc::new(InMemoryRecordStore::new());

        let users = UserService::new(Arc::clone(&user_store), hasher);

        Ok(Self {
            products: Arc::new(ProductService::new(Arc::clone(&product_store))),
            purchases: Arc::new(PurchaseService::new(
                purchase_store,
                Arc::clone(&product_store),
                Arc::clone(&user_store),
            )),
            posts: Arc::new(PostService::new(post_store, Arc::clone(&user_store))),
            auth: Arc::new(AuthService::new(users.clone(), tokens.clone())),
            users: Arc::new(users),
            tokens: Arc::new(tokens),
        })
    }
}
