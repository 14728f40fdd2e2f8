//! Generic CRUD handlers shared by every resource.
//!
//! Each handler parses its inputs, makes exactly one usecase call, and maps
//! the outcome to a JSON response. Malformed input is answered with 400
//! before the usecase is touched; any usecase failure becomes 500 with the
//! resource's fixed message, and the cause only goes to the log.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};

use storefront_core::{CrudUsecase, DomainError, RecordId};

use crate::app::messages::{MessageCatalog, MessageKey, Resource};
use crate::app::{dto, errors};

/// Adapter between HTTP and one resource's usecase.
pub struct ResourceHandler<U: ?Sized> {
    resource: Resource,
    usecase: Arc<U>,
    messages: Arc<MessageCatalog>,
}

impl<U: ?Sized> Clone for ResourceHandler<U> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            usecase: Arc::clone(&self.usecase),
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<U> ResourceHandler<U>
where
    U: CrudUsecase + ?Sized + 'static,
{
    pub fn new(resource: Resource, usecase: Arc<U>, messages: Arc<MessageCatalog>) -> Self {
        Self {
            resource,
            usecase,
            messages,
        }
    }

    fn reject(&self, key: MessageKey) -> Response {
        errors::json_error(StatusCode::BAD_REQUEST, self.messages.text(self.resource, key))
    }

    /// Undecodable segments (e.g. `%FF`) count as invalid ids too.
    fn id(&self, raw: Result<Path<String>, PathRejection>) -> Result<RecordId, Response> {
        raw.ok()
            .and_then(|Path(raw)| dto::parse_id(&raw))
            .ok_or_else(|| self.reject(MessageKey::InvalidId))
    }

    fn input(&self, body: &[u8]) -> Result<U::Input, Response> {
        dto::parse_body(body).map_err(|e| {
            tracing::debug!(resource = self.resource.as_str(), error = %e, "rejected request body");
            self.reject(MessageKey::InvalidBody)
        })
    }

    fn failed(&self, key: MessageKey, err: DomainError) -> Response {
        tracing::warn!(resource = self.resource.as_str(), message_key = ?key, error = %err, "usecase failed");
        errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            self.messages.text(self.resource, key),
        )
    }
}

/// `POST /`, `GET /`, `GET|PUT|DELETE /:id` for one resource.
pub fn router<U>(handler: ResourceHandler<U>) -> Router
where
    U: CrudUsecase + ?Sized + 'static,
{
    Router::new()
        .route("/", post(create::<U>).get(list::<U>))
        .route(
            "/:id",
            get(get_by_id::<U>).put(update::<U>).delete(delete::<U>),
        )
        .with_state(handler)
}

pub async fn create<U>(State(h): State<ResourceHandler<U>>, body: Bytes) -> Response
where
    U: CrudUsecase + ?Sized + 'static,
{
    let input = match h.input(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.create(input).await {
        Ok(entity) => errors::json_data(entity),
        Err(e) => h.failed(MessageKey::CreateFailed, e),
    }
}

pub async fn list<U>(State(h): State<ResourceHandler<U>>) -> Response
where
    U: CrudUsecase + ?Sized + 'static,
{
    match h.usecase.list().await {
        Ok(entities) => errors::json_data(entities),
        Err(e) => h.failed(MessageKey::ListFailed, e),
    }
}

pub async fn get_by_id<U>(
    State(h): State<ResourceHandler<U>>,
    id: Result<Path<String>, PathRejection>,
) -> Response
where
    U: CrudUsecase + ?Sized + 'static,
{
    let id = match h.id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.get_by_id(id).await {
        Ok(entity) => errors::json_data(entity),
        Err(e) => h.failed(MessageKey::GetFailed, e),
    }
}

pub async fn update<U>(
    State(h): State<ResourceHandler<U>>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Response
where
    U: CrudUsecase + ?Sized + 'static,
{
    let id = match h.id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let input = match h.input(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.update(id, input).await {
        Ok(entity) => errors::json_data(entity),
        Err(e) => h.failed(MessageKey::UpdateFailed, e),
    }
}

pub async fn delete<U>(
    State(h): State<ResourceHandler<U>>,
    id: Result<Path<String>, PathRejection>,
) -> Response
where
    U: CrudUsecase + ?Sized + 'static,
{
    let id = match h.id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match h.usecase.delete(id).await {
        Ok(()) => errors::json_message(h.messages.text(h.resource, MessageKey::Deleted)),
        Err(e) => h.failed(MessageKey::DeleteFailed, e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use storefront_core::DomainResult;
    use storefront_infra::Locale;
    use storefront_products::{Product, ProductInput};

    use super::*;

    /// Stand-in usecase: echoes inputs back as products and counts calls.
    #[derive(Default)]
    struct StubProducts {
        calls: AtomicUsize,
        failure: Option<DomainError>,
    }

    impl StubProducts {
        fn failing(err: DomainError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failure: Some(err),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn outcome<T>(&self, ok: T) -> DomainResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(ok),
            }
        }
    }

    fn widget(id: u32) -> Product {
        Product {
            id: RecordId::new(id),
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
            stock: None,
        }
    }

    #[async_trait]
    impl CrudUsecase for StubProducts {
        type Input = ProductInput;
        type Entity = Product;

        async fn create(&self, input: ProductInput) -> DomainResult<Product> {
            self.outcome(Product::from_input(RecordId::new(1), input))
        }

        async fn list(&self) -> DomainResult<Vec<Product>> {
            self.outcome(vec![widget(1), widget(2)])
        }

        async fn get_by_id(&self, id: RecordId) -> DomainResult<Product> {
            self.outcome(widget(id.get()))
        }

        async fn update(&self, id: RecordId, input: ProductInput) -> DomainResult<Product> {
            self.outcome(Product::from_input(id, input))
        }

        async fn delete(&self, _id: RecordId) -> DomainResult<()> {
            self.outcome(())
        }
    }

    fn app(stub: Arc<StubProducts>) -> Router {
        let messages = Arc::new(MessageCatalog::new(Locale::Ja));
        Router::new().nest(
            "/products",
            router(ResourceHandler::new(Resource::Product, stub, messages)),
        )
    }

    async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_owned()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn create_returns_created_entity() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(
            app(stub.clone()),
            Method::POST,
            "/products",
            r#"{"name":"Widget","price":9.99}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"id": 1, "name": "Widget", "price": 9.99}}));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_body_never_reaches_usecase() {
        let stub = Arc::new(StubProducts::default());
        for raw in ["", "{", "not json", r#"{"name":"Widget"}"#, r#"{"name":"W","price":"x"}"#] {
            let (status, body) = send(app(stub.clone()), Method::POST, "/products", raw).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw:?}");
            assert_eq!(body, json!({"error": "商品のデータの形式が正しくありません。"}));

            let (status, _) = send(app(stub.clone()), Method::PUT, "/products/1", raw).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw:?}");
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn list_wraps_entities_in_data() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(app(stub), Method::GET, "/products", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][1]["id"], 2);
    }

    #[tokio::test]
    async fn invalid_id_is_rejected_with_message() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(app(stub.clone()), Method::GET, "/products/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "商品IDが無効です。"}));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn undecodable_id_is_rejected_with_json() {
        let stub = Arc::new(StubProducts::default());
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (status, body) = send(app(stub.clone()), method, "/products/%FF", "{}").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "商品IDが無効です。"}));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn update_checks_id_before_body() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(app(stub.clone()), Method::PUT, "/products/-1", "{").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "商品IDが無効です。"}));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn update_returns_updated_entity() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(
            app(stub),
            Method::PUT,
            "/products/7",
            r#"{"name":"Gadget","price":3.5,"stock":2}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"id": 7, "name": "Gadget", "price": 3.5, "stock": 2}}));
    }

    #[tokio::test]
    async fn delete_returns_success_message() {
        let stub = Arc::new(StubProducts::default());
        let (status, body) = send(app(stub), Method::DELETE, "/products/42", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "商品は正常に削除されました。"}));
    }

    #[tokio::test]
    async fn every_usecase_failure_is_a_500() {
        let cases = [
            (Method::POST, "/products", r#"{"name":"Widget","price":9.99}"#, "データベースに商品を保存できませんでした。"),
            (Method::GET, "/products", "", "商品のリストの取得に失敗しました。"),
            (Method::GET, "/products/1", "", "商品の情報を取得できませんでした。"),
            (Method::PUT, "/products/1", r#"{"name":"Widget","price":9.99}"#, "商品の更新に失敗しました。"),
            (Method::DELETE, "/products/1", "", "商品の削除に失敗しました。"),
        ];
        let failures = [
            DomainError::NotFound,
            DomainError::conflict("dup"),
            DomainError::storage("connection refused"),
            DomainError::validation("bad"),
        ];

        for err in failures {
            for (method, uri, body, message) in cases.clone() {
                let stub = Arc::new(StubProducts::failing(err.clone()));
                let (status, got) = send(app(stub), method, uri, body).await;
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{err:?} {uri}");
                assert_eq!(got, json!({"error": message}));
            }
        }
    }

    #[tokio::test]
    async fn repeated_get_is_idempotent() {
        let stub = Arc::new(StubProducts::default());
        let first = send(app(stub.clone()), Method::GET, "/products/5", "").await;
        let second = send(app(stub), Method::GET, "/products/5", "").await;
        assert_eq!(first, second);
    }

    fn bad_id() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z][a-zA-Z0-9]{0,8}",
            "-[0-9]{1,9}",
            "[0-9]{11,15}",
            "[0-9]{1,3}\\.[0-9]{1,3}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

        #[test]
        fn unparseable_ids_are_400_for_every_id_route(id in bad_id()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let stub = Arc::new(StubProducts::default());
            let uri = format!("/products/{id}");

            for (method, body) in [
                (Method::GET, ""),
                (Method::PUT, r#"{"name":"Widget","price":1.0}"#),
                (Method::DELETE, ""),
            ] {
                let (status, _) = rt.block_on(send(app(stub.clone()), method, &uri, body));
                prop_assert_eq!(status, StatusCode::BAD_REQUEST);
            }
            prop_assert_eq!(stub.calls(), 0);
        }

        #[test]
        fn valid_ids_reach_the_usecase(id in any::<u32>()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let stub = Arc::new(StubProducts::default());
            let (status, body) = rt.block_on(send(app(stub), Method::GET, &format!("/products/{id}"), ""));
            prop_assert_eq!(status, StatusCode::OK);
            prop_assert_eq!(&body["data"]["id"], &json!(id));
        }
    }
}
