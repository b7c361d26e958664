use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::CustomerType;
use crate::domain::value_objects::{Address, Email, PhoneNumber};
use crate::shared::DomainEvent;

// ============================================================================
// Customer Domain Events
// ============================================================================

/// Union type for all customer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    Created(CustomerCreated),
    ContactUpdated(CustomerContactUpdated),
    AddressChanged(CustomerAddressChanged),
    TypeChanged(CustomerTypeChanged),
    VipStatusChanged(CustomerVipStatusChanged),
    Deactivated(CustomerDeactivated),
    Reactivated(CustomerReactivated),
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::Created(_) => "CustomerCreated",
            CustomerEvent::ContactUpdated(_) => "CustomerContactUpdated",
            CustomerEvent::AddressChanged(_) => "CustomerAddressChanged",
            CustomerEvent::TypeChanged(_) => "CustomerTypeChanged",
            CustomerEvent::VipStatusChanged(_) => "CustomerVipStatusChanged",
            CustomerEvent::Deactivated(_) => "CustomerDeactivated",
            CustomerEvent::Reactivated(_) => "CustomerReactivated",
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreated {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerContactUpdated {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub old_address: Address,
    pub new_address: Address,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTypeChanged {
    pub old_type: CustomerType,
    pub new_type: CustomerType,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerVipStatusChanged {
    pub is_vip: bool,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDeactivated {
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReactivated {
    pub at: DateTime<Utc>,
}
