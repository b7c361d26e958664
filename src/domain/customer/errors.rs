use crate::domain::value_objects::ValidationError;
use crate::error::ErrorKind;

// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Customer is inactive; only reactivation is allowed")]
    Inactive,

    #[error("Customer is already active")]
    AlreadyActive,

    #[error("Aggregate not initialized")]
    NotInitialized,
}

impl CustomerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomerError::Validation(_) => ErrorKind::Validation,
            CustomerError::Inactive | CustomerError::AlreadyActive | CustomerError::NotInitialized => {
                ErrorKind::InvariantViolation
            }
        }
    }
}
