use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::{Entity, Repository, RepositoryError};
use crate::shared::Specification;

// ============================================================================
// In-Memory Repository
// ============================================================================
//
// Vec-backed repository keeping insertion order. Enforces unique keys on
// add/update and optimistic concurrency on update. Specifications with a
// query form are evaluated through the filter, the rest through their
// predicate.
//
// ============================================================================

pub struct InMemoryRepository<T: Entity> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    fn check_unique(items: &[T], candidate: &T) -> Result<(), RepositoryError> {
        let candidate_id = candidate.aggregate_id();
        for (field, value) in candidate.unique_keys() {
            let taken = items
                .iter()
                .filter(|existing| existing.aggregate_id() != candidate_id)
                .any(|existing| {
                    existing
                        .unique_keys()
                        .iter()
                        .any(|(f, v)| *f == field && *v == value)
                });
            if taken {
                return Err(RepositoryError::UniqueViolation {
                    entity: T::NAME,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.items.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.aggregate_id() == id).cloned())
    }

    async fn add(&self, entity: T) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        let id = entity.aggregate_id();

        if items.iter().any(|item| item.aggregate_id() == id) {
            return Err(RepositoryError::AlreadyExists { entity: T::NAME, id });
        }
        Self::check_unique(&items, &entity)?;

        items.push(entity);
        tracing::debug!(entity = T::NAME, entity_id = %id, "Entity added");
        Ok(())
    }

    async fn update(&self, entity: T, expected_version: i64) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        let id = entity.aggregate_id();

        let Some(index) = items.iter().position(|item| item.aggregate_id() == id) else {
            return Err(RepositoryError::NotFound { entity: T::NAME, id });
        };

        let actual = items[index].version();
        if actual != expected_version {
            return Err(RepositoryError::ConcurrencyConflict {
                entity: T::NAME,
                id,
                expected: expected_version,
                actual,
            });
        }
        Self::check_unique(&items, &entity)?;

        tracing::debug!(
            entity = T::NAME,
            entity_id = %id,
            from_version = actual,
            to_version = entity.version(),
            "Entity updated"
        );
        items[index] = entity;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.aggregate_id() != id);

        if items.len() == before {
            return Err(RepositoryError::NotFound { entity: T::NAME, id });
        }
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .any(|item| item.aggregate_id() == id))
    }

    async fn search(&self, spec: &dyn Specification<T>) -> Result<Vec<T>, RepositoryError> {
        let items = self.items.read().await;

        let matched: Vec<T> = match spec.to_query() {
            Some(filter) => {
                tracing::debug!(entity = T::NAME, filter = %filter, "Evaluating query filter");
                items.iter().filter(|item| filter.matches(*item)).cloned().collect()
            }
            None => items
                .iter()
                .filter(|item| spec.is_satisfied_by(item))
                .cloned()
                .collect(),
        };

        Ok(matched)
    }
}
