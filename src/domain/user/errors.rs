use chrono::{DateTime, Utc};

use crate::domain::value_objects::ValidationError;
use crate::error::ErrorKind;

// ============================================================================
// User Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User account has been deleted")]
    Deleted,

    #[error("User account is inactive")]
    Inactive,

    #[error("User account is locked until {until}")]
    LockedOut { until: DateTime<Utc> },

    #[error("Aggregate not initialized")]
    NotInitialized,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Validation(_) => ErrorKind::Validation,
            UserError::Deleted
            | UserError::Inactive
            | UserError::LockedOut { .. }
            | UserError::NotInitialized => ErrorKind::InvariantViolation,
        }
    }
}
