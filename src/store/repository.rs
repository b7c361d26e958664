use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::shared::{Aggregate, FieldAccess, Specification};

// ============================================================================
// Repository Port
// ============================================================================
//
// The storage collaborator the services talk to. Implementations own
// persistence, uniqueness and optimistic concurrency; the domain never
// assumes them itself.
//
// ============================================================================

/// An aggregate that can be stored by a repository
pub trait Entity: Aggregate + FieldAccess + 'static {
    /// Name used in logs and error messages, e.g. `"Customer"`
    const NAME: &'static str;

    /// Fields that must be unique across the stored set, as (field, value)
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: Uuid },

    #[error("{entity} with {field} '{value}' already exists")]
    UniqueViolation {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Concurrency conflict on {entity} {id}: expected version {expected}, but current is {actual}")]
    ConcurrencyConflict {
        entity: &'static str,
        id: Uuid,
        expected: i64,
        actual: i64,
    },

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::AlreadyExists { .. }
            | RepositoryError::UniqueViolation { .. }
            | RepositoryError::ConcurrencyConflict { .. } => ErrorKind::Conflict,
            RepositoryError::Unavailable(_) => ErrorKind::Infrastructure,
        }
    }
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, RepositoryError>;

    async fn add(&self, entity: T) -> Result<(), RepositoryError>;

    /// Replace a stored entity that is still at `expected_version`
    async fn update(&self, entity: T, expected_version: i64) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Entities matching `spec`, in storage order
    async fn search(&self, spec: &dyn Specification<T>) -> Result<Vec<T>, RepositoryError>;
}
