//! In-process adapter for the generic repository.
//!
//! Records live in insertion order behind an async `RwLock`; filters are
//! evaluated against each record's serde JSON form.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::base::Repository;
use super::filter::Filter;
use crate::domain::Identifiable;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Paginated, PaginationParams};

pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Start from existing records (skips duplicate checks).
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn matching<T: Serialize + Clone>(records: &[T], filter: &Filter) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for record in records {
        let json = serde_json::to_value(record)
            .map_err(|e| AppError::internal(format!("Failed to serialize record: {}", e)))?;
        if filter.matches(&json) {
            out.push(record.clone());
        }
    }
    Ok(out)
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Identifiable + Serialize + Clone + Send + Sync + 'static,
{
    async fn create(&self, entity: T) -> AppResult<T> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(AppError::conflict("Record"));
        }
        records.push(entity.clone());
        Ok(entity)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn get_by_condition(&self, filter: &Filter) -> AppResult<Option<T>> {
        let records = self.records.read().await;
        Ok(matching(&records, filter)?.into_iter().next())
    }

    async fn get_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn get_paged(&self, params: &PaginationParams) -> AppResult<Paginated<T>> {
        let records = self.records.read().await;
        let data = records
            .iter()
            .skip(usize::try_from(params.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(params.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Paginated::new(
            data,
            params.page(),
            params.limit(),
            records.len() as u64,
        ))
    }

    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        let records = self.records.read().await;
        matching(&records, filter)
    }

    async fn update(&self, entity: T) -> AppResult<T> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or_not_found()?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let records = self.records.read().await;
        Ok(matching(&records, filter)?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn user(name: &str) -> User {
        User::new(name.into(), format!("{}@example.com", name), "hash".into())
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = InMemoryRepository::new();
        let alice = user("alice");

        repo.create(alice.clone()).await.unwrap();
        let result = repo.create(alice).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_by_condition_returns_first_match() {
        let repo = InMemoryRepository::with_records(vec![user("alice"), user("bob")]);

        let found = repo
            .get_by_condition(&Filter::eq("email", "bob@example.com"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().username, "bob");

        let missing = repo
            .get_by_condition(&Filter::eq("email", "nobody@x.com"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_password_hash_is_not_filterable() {
        let repo = InMemoryRepository::with_records(vec![user("alice")]);

        let count = repo.count(&Filter::eq("password_hash", "hash")).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo: InMemoryRepository<User> = InMemoryRepository::new();

        assert!(matches!(repo.update(user("ghost")).await, Err(AppError::NotFound)));
        assert!(matches!(repo.delete(Uuid::new_v4()).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_paged_read() {
        let users: Vec<User> = (0..5).map(|i| user(&format!("user{}", i))).collect();
        let repo = InMemoryRepository::with_records(users);

        let page = repo.get_paged(&PaginationParams::new(2, 2)).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].username, "user2");
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = InMemoryRepository::with_records(vec![user("alice")]);

        let page = repo
            .get_paged(&PaginationParams::new(u64::MAX, 100))
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 1);
    }
}
