//! The usecase contract every CRUD resource implements.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::{DomainResult, RecordId};

/// Application-layer operations over one resource.
///
/// The HTTP layer only ever talks to a resource through this trait, usually as
/// `Arc<dyn CrudUsecase<Input = .., Entity = ..>>`. Implementations must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait CrudUsecase: Send + Sync {
    /// Payload accepted from clients on create and update.
    type Input: DeserializeOwned + Send + 'static;

    /// Entity handed back to clients.
    type Entity: Serialize + Send + 'static;

    async fn create(&self, input: Self::Input) -> DomainResult<Self::Entity>;

    async fn list(&self) -> DomainResult<Vec<Self::Entity>>;

    async fn get_by_id(&self, id: RecordId) -> DomainResult<Self::Entity>;

    async fn update(&self, id: RecordId, input: Self::Input) -> DomainResult<Self::Entity>;

    async fn delete(&self, id: RecordId) -> DomainResult<()>;
}
