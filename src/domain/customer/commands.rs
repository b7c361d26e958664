use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::CustomerType;
use crate::domain::value_objects::{Address, Email, PhoneNumber};

// ============================================================================
// Customer Domain Commands
// ============================================================================
//
// Value objects arrive already parsed; free text (names, notes) is checked
// by the aggregate.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub address: Address,
    pub customer_type: CustomerType,
    pub is_vip: bool,
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum CustomerCommand {
    UpdateContact {
        first_name: String,
        last_name: String,
        email: Email,
        phone: Option<PhoneNumber>,
        notes: Option<String>,
        at: DateTime<Utc>,
    },
    ChangeAddress {
        address: Address,
        at: DateTime<Utc>,
    },
    ChangeType {
        customer_type: CustomerType,
        at: DateTime<Utc>,
    },
    SetVip {
        is_vip: bool,
        at: DateTime<Utc>,
    },
    Deactivate {
        reason: Option<String>,
        at: DateTime<Utc>,
    },
    Reactivate {
        at: DateTime<Utc>,
    },
}
