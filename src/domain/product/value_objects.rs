use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Product Value Objects
// ============================================================================

/// Stock level as seen by buyers. Always derived from the product, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductAvailabilityStatus {
    InStock,
    LowStock,
    OutOfStock,
    Discontinued,
}

impl ProductAvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductAvailabilityStatus::InStock => "InStock",
            ProductAvailabilityStatus::LowStock => "LowStock",
            ProductAvailabilityStatus::OutOfStock => "OutOfStock",
            ProductAvailabilityStatus::Discontinued => "Discontinued",
        }
    }
}

impl fmt::Display for ProductAvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryMovementType {
    InitialStock,
    Inbound,
    Outbound,
    CorrectionIncrease,
    CorrectionDecrease,
    Return,
}

impl InventoryMovementType {
    pub const ALL: [InventoryMovementType; 6] = [
        InventoryMovementType::InitialStock,
        InventoryMovementType::Inbound,
        InventoryMovementType::Outbound,
        InventoryMovementType::CorrectionIncrease,
        InventoryMovementType::CorrectionDecrease,
        InventoryMovementType::Return,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryMovementType::InitialStock => "InitialStock",
            InventoryMovementType::Inbound => "Inbound",
            InventoryMovementType::Outbound => "Outbound",
            InventoryMovementType::CorrectionIncrease => "CorrectionIncrease",
            InventoryMovementType::CorrectionDecrease => "CorrectionDecrease",
            InventoryMovementType::Return => "Return",
        }
    }

    /// Whether the movement removes units from stock
    pub fn is_decrease(&self) -> bool {
        matches!(
            self,
            InventoryMovementType::Outbound | InventoryMovementType::CorrectionDecrease
        )
    }

    /// Stock replenishment, refused once a product is discontinued
    pub fn is_replenishment(&self) -> bool {
        matches!(
            self,
            InventoryMovementType::InitialStock | InventoryMovementType::Inbound
        )
    }

    /// Quantity after moving `amount` units from `current`; `None` if it
    /// would drop below zero or overflow
    pub fn apply(&self, current: u32, amount: u32) -> Option<u32> {
        if self.is_decrease() {
            current.checked_sub(amount)
        } else {
            current.checked_add(amount)
        }
    }
}

impl fmt::Display for InventoryMovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit record of one stock change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: Uuid,
    pub movement_type: InventoryMovementType,
    pub quantity: u32,
    pub resulting_quantity: u32,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Replay a movement history; `None` if any step is impossible
pub fn fold_movements(movements: &[InventoryMovement]) -> Option<u32> {
    movements
        .iter()
        .try_fold(0u32, |quantity, m| m.movement_type.apply(quantity, m.quantity))
}
