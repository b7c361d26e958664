use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::InventoryMovement;
use crate::shared::DomainEvent;

// ============================================================================
// Product Domain Events
// ============================================================================

/// Union type for all product events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    Created(ProductCreated),
    Renamed(ProductRenamed),
    Repriced(ProductRepriced),
    BrandAssigned(ProductBrandAssigned),
    ThresholdChanged(ProductThresholdChanged),
    StockAdjusted(ProductStockAdjusted),
    Discontinued(ProductDiscontinued),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::Created(_) => "ProductCreated",
            ProductEvent::Renamed(_) => "ProductRenamed",
            ProductEvent::Repriced(_) => "ProductRepriced",
            ProductEvent::BrandAssigned(_) => "ProductBrandAssigned",
            ProductEvent::ThresholdChanged(_) => "ProductThresholdChanged",
            ProductEvent::StockAdjusted(_) => "ProductStockAdjusted",
            ProductEvent::Discontinued(_) => "ProductDiscontinued",
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRenamed {
    pub old_name: String,
    pub new_name: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRepriced {
    pub old_price_cents: i64,
    pub new_price_cents: i64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBrandAssigned {
    pub brand_id: Option<Uuid>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductThresholdChanged {
    pub low_stock_threshold: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStockAdjusted {
    pub movement: InventoryMovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDiscontinued {
    pub at: DateTime<Utc>,
}
