use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::DomainEvent;

// ============================================================================
// Brand Domain Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BrandEvent {
    Created(BrandCreated),
    Renamed(BrandRenamed),
    Deactivated(BrandStatusChanged),
    Reactivated(BrandStatusChanged),
}

impl DomainEvent for BrandEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BrandEvent::Created(_) => "BrandCreated",
            BrandEvent::Renamed(_) => "BrandRenamed",
            BrandEvent::Deactivated(_) => "BrandDeactivated",
            BrandEvent::Reactivated(_) => "BrandReactivated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCreated {
    pub brand_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRenamed {
    pub old_name: String,
    pub new_name: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandStatusChanged {
    pub at: DateTime<Utc>,
}
