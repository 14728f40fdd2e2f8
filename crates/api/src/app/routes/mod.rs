use std::sync::Arc;

use axum::Router;

use crate::app::messages::{MessageCatalog, Resource};
use crate::app::services::AppServices;

pub mod auth;
pub mod crud;
pub mod system;

use crud::ResourceHandler;

/// Router for every resource plus the auth endpoints.
pub fn router(services: &AppServices, messages: &Arc<MessageCatalog>) -> Router {
    Router::new()
        .nest(
            "/products",
            crud::router(ResourceHandler::new(
                Resource::Product,
                Arc::clone(&services.products),
                Arc::clone(messages),
            )),
        )
        .nest(
            "/purchases",
            crud::router(ResourceHandler::new(
                Resource::Purchase,
                Arc::clone(&services.purchases),
                Arc::clone(messages),
            )),
        )
        .nest(
            "/users",
            crud::router(ResourceHandler::new(
                Resource::User,
                Arc::clone(&services.users),
                Arc::clone(messages),
            )),
        )
        .nest(
            "/posts",
            crud::router(ResourceHandler::new(
                Resource::Post,
                Arc::clone(&services.posts),
                Arc::clone(messages),
            )),
        )
        .nest("/auth", auth::router(services, messages))
}
