use crate::domain::value_objects::ValidationError;
use crate::error::ErrorKind;

// ============================================================================
// Brand Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Brand is inactive")]
    Inactive,

    #[error("Aggregate not initialized")]
    NotInitialized,
}

impl BrandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrandError::Validation(_) => ErrorKind::Validation,
            BrandError::Inactive | BrandError::NotInitialized => ErrorKind::InvariantViolation,
        }
    }
}
