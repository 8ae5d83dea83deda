//! Common traits for SeaORM repository implementations

use async_trait::async_trait;

use crate::errors::RepositoryResult;

/// CRUD operations shared by the editable aggregates
#[async_trait]
pub trait Repository<Domain, CreateRequest, UpdateRequest> {
    /// Create a new entity
    async fn create(&self, request: CreateRequest) -> RepositoryResult<Domain>;

    /// Find entity by ID
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Domain>>;

    /// Update entity, failing with `RecordNotFound` if it does not exist
    async fn update(&self, id: i32, request: UpdateRequest) -> RepositoryResult<Domain>;

    /// Delete entity, failing with `RecordNotFound` if it does not exist
    async fn delete(&self, id: i32) -> RepositoryResult<()>;

    /// List all entities
    async fn list_all(&self) -> RepositoryResult<Vec<Domain>>;
}
