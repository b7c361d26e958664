use uuid::Uuid;

use crate::domain::brand::BrandError;
use crate::domain::customer::CustomerError;
use crate::domain::product::ProductError;
use crate::domain::user::UserError;
use crate::domain::value_objects::ValidationError;
use crate::shared::PaginationError;
use crate::store::RepositoryError;

// ============================================================================
// Outcome - Uniform Return Contract
// ============================================================================
//
// Every service and domain operation returns `Outcome<T>`: `Ok(value)` on
// success, `Err(DomainError)` on failure. `Outcome` (T = ()) is the
// pass/fail form. Per-aggregate errors convert with `From`, so `?` chains
// stop at the first failure and carry its message through unchanged.
//
// ============================================================================

pub type Outcome<T = ()> = Result<T, DomainError>;

/// Broad class of a failure, for callers that map failures to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input
    Validation,
    /// An entity rule was broken
    InvariantViolation,
    /// The entity does not exist
    NotFound,
    /// A unique field is already taken, or the entity changed underneath
    Conflict,
    /// A collaborator failed for reasons unrelated to the request
    Infrastructure,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Brand(#[from] BrandError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) | DomainError::Pagination(_) => ErrorKind::Validation,
            DomainError::Customer(e) => e.kind(),
            DomainError::Product(e) => e.kind(),
            DomainError::User(e) => e.kind(),
            DomainError::Brand(e) => e.kind(),
            DomainError::Repository(e) => e.kind(),
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    /// Human-readable failure message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
