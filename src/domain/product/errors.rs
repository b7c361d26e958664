use uuid::Uuid;

use super::value_objects::InventoryMovementType;
use crate::domain::value_objects::ValidationError;
use crate::error::ErrorKind;

// ============================================================================
// Product Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product is discontinued")]
    Discontinued,

    #[error("Product is already discontinued")]
    AlreadyDiscontinued,

    #[error("Service products do not track stock")]
    ServiceHasNoStock,

    #[error("Initial stock can only be recorded before any other movement")]
    InitialStockAlreadyRecorded,

    #[error("Discontinued products cannot receive {0} movements")]
    ReplenishmentRefused(InventoryMovementType),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Stock quantity would exceed {max}")]
    StockOverflow { max: u32 },

    #[error("Brand {0} is inactive")]
    BrandInactive(Uuid),

    #[error("Aggregate not initialized")]
    NotInitialized,
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::InvariantViolation,
        }
    }
}
