use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::InventoryMovementType;

// ============================================================================
// Product Domain Commands
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub product_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub price_cents: i64,
    pub is_service: bool,
    pub low_stock_threshold: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum ProductCommand {
    AdjustStock {
        movement_type: InventoryMovementType,
        amount: u32,
        reason: Option<String>,
        at: DateTime<Utc>,
    },
    Rename {
        name: String,
        at: DateTime<Utc>,
    },
    Reprice {
        price_cents: i64,
        at: DateTime<Utc>,
    },
    AssignBrand {
        brand_id: Option<Uuid>,
        at: DateTime<Utc>,
    },
    ChangeThreshold {
        low_stock_threshold: u32,
        at: DateTime<Utc>,
    },
    Discontinue {
        at: DateTime<Utc>,
    },
}
