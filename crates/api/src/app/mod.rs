//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: dependency injection (stores and usecases)
//! - `routes/`: HTTP routes + handlers (`crud.rs` is shared by every resource)
//! - `messages.rs`: localized client-facing messages
//! - `dto.rs`: response envelopes and request parsing helpers
//! - `errors.rs`: consistent JSON responses

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use storefront_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod messages;
pub mod routes;
pub mod services;

use messages::MessageCatalog;
use services::AppServices;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = AppServices::in_memory(config)?;
    let messages = Arc::new(MessageCatalog::new(config.locale));
    Ok(build_router(&services, messages))
}

/// Build the router over already-wired services.
pub fn build_router(services: &AppServices, messages: Arc<MessageCatalog>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(services, &messages))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
