use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// Brand Domain Commands
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateBrand {
    pub brand_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum BrandCommand {
    Rename { name: String, at: DateTime<Utc> },
    Deactivate { at: DateTime<Utc> },
    Reactivate { at: DateTime<Utc> },
}
