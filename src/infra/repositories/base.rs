//! Generic repository contract.
//!
//! One trait covers the whole capability set; each storage technology
//! provides a single adapter implementing it for any entity it can map.

use async_trait::async_trait;
use uuid::Uuid;

use super::filter::Filter;
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// CRUD plus predicate-based reads over entities of type `T`.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Persist a new entity. Duplicate keys yield `Conflict`.
    async fn create(&self, entity: T) -> AppResult<T>;

    /// Find entity by primary key
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>>;

    /// First entity matching the filter
    async fn get_by_condition(&self, filter: &Filter) -> AppResult<Option<T>>;

    async fn get_all(&self) -> AppResult<Vec<T>>;

    /// One page of entities in primary key order
    async fn get_paged(&self, params: &PaginationParams) -> AppResult<Paginated<T>>;

    /// Every entity matching the filter
    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>>;

    /// Overwrite an existing entity. Missing entities yield `NotFound`.
    async fn update(&self, entity: T) -> AppResult<T>;

    /// Remove by primary key. Missing entities yield `NotFound`.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn exists(&self, filter: &Filter) -> AppResult<bool> {
        Ok(self.count(filter).await? > 0)
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64>;
}
