//! `/auth`: register, login, and the current user.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};

use storefront_auth::{AuthUsecase, LoginInput, RegisterInput};
use storefront_core::DomainError;

use crate::app::messages::{MessageCatalog, MessageKey, Resource};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;
use crate::middleware::{self, AuthState};

#[derive(Clone)]
pub struct AuthHandler {
    usecase: Arc<dyn AuthUsecase>,
    messages: Arc<MessageCatalog>,
}

impl AuthHandler {
    fn text(&self, key: MessageKey) -> &str {
        self.messages.text(Resource::Auth, key)
    }

    fn input<T: serde::de::DeserializeOwned>(&self, body: &[u8]) -> Result<T, Response> {
        dto::parse_body(body)
            .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, self.text(MessageKey::InvalidBody)))
    }
}

pub fn router(services: &AppServices, messages: &Arc<MessageCatalog>) -> Router {
    let handler = AuthHandler {
        usecase: Arc::clone(&services.auth),
        messages: Arc::clone(messages),
    };
    let auth_state = AuthState {
        tokens: Arc::clone(&services.tokens),
        messages: Arc::clone(messages),
    };

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/user",
            get(current_user).route_layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            )),
        )
        .with_state(handler)
}

pub async fn register(State(h): State<AuthHandler>, body: Bytes) -> Response {
    let input: RegisterInput = match h.input(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.register(input).await {
        Ok(session) => errors::json_data(session),
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, h.text(MessageKey::CreateFailed))
        }
    }
}

pub async fn login(State(h): State<AuthHandler>, body: Bytes) -> Response {
    let input: LoginInput = match h.input(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.login(input).await {
        Ok(session) => errors::json_data(session),
        Err(e) => {
            if e != DomainError::Unauthorized {
                tracing::warn!(error = %e, "login failed");
            }
            errors::json_error(StatusCode::UNAUTHORIZED, h.text(MessageKey::InvalidCredentials))
        }
    }
}

pub async fn current_user(
    State(h): State<AuthHandler>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    match h.usecase.current_user(principal.user_id()).await {
        Ok(user) => errors::json_data(user),
        Err(e) => {
            tracing::warn!(user_id = %principal.user_id(), error = %e, "current user lookup failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, h.text(MessageKey::GetFailed))
        }
    }
}
