use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::commands::{CreateCustomer, CustomerCommand};
use super::errors::CustomerError;
use super::events::*;
use super::value_objects::{CustomerStatus, CustomerType};
use crate::domain::value_objects::{optional_text, required_text, Address, Email, PhoneNumber};
use crate::shared::{Aggregate, FieldAccess, FieldValue};
use crate::store::Entity;

pub const NAME_MAX_LEN: usize = 100;
pub const NOTES_MAX_LEN: usize = 2000;

// ============================================================================
// Customer Aggregate - Business Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    customer_id: Uuid,
    version: i64,
    first_name: String,
    last_name: String,
    email: Email,
    phone: Option<PhoneNumber>,
    address: Address,
    customer_type: CustomerType,
    status: CustomerStatus,
    is_vip: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// Validate a new customer and build it from its creation event
    pub fn create(command: &CreateCustomer) -> Result<Self, CustomerError> {
        let event = CustomerEvent::Created(CustomerCreated {
            customer_id: command.customer_id,
            first_name: required_text("first_name", &command.first_name, NAME_MAX_LEN)?,
            last_name: required_text("last_name", &command.last_name, NAME_MAX_LEN)?,
            email: command.email.clone(),
            phone: command.phone.clone(),
            address: command.address.clone(),
            customer_type: command.customer_type,
            is_vip: command.is_vip,
            notes: optional_text("notes", command.notes.as_deref(), NOTES_MAX_LEN)?,
            at: command.at,
        });
        Self::apply_first_event(&event)
    }

    pub fn id(&self) -> Uuid {
        self.customer_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }

    pub fn is_vip(&self) -> bool {
        self.is_vip
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Every command except reactivation needs an active customer
    fn validate_active(&self) -> Result<(), CustomerError> {
        match self.status {
            CustomerStatus::Active => Ok(()),
            CustomerStatus::Inactive => Err(CustomerError::Inactive),
        }
    }
}

impl Aggregate for Customer {
    type Event = CustomerEvent;
    type Command = CustomerCommand;
    type Error = CustomerError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            CustomerEvent::Created(e) => Ok(Self {
                customer_id: e.customer_id,
                version: 1,
                first_name: e.first_name.clone(),
                last_name: e.last_name.clone(),
                email: e.email.clone(),
                phone: e.phone.clone(),
                address: e.address.clone(),
                customer_type: e.customer_type,
                status: CustomerStatus::Active,
                is_vip: e.is_vip,
                notes: e.notes.clone(),
                created_at: e.at,
                updated_at: e.at,
            }),
            _ => Err(CustomerError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            CustomerEvent::Created(_) => {
                // Already applied in apply_first_event
            }
            CustomerEvent::ContactUpdated(e) => {
                self.first_name = e.first_name.clone();
                self.last_name = e.last_name.clone();
                self.email = e.email.clone();
                self.phone = e.phone.clone();
                self.notes = e.notes.clone();
                self.updated_at = e.at;
            }
            CustomerEvent::AddressChanged(e) => {
                self.address = e.new_address.clone();
                self.updated_at = e.at;
            }
            CustomerEvent::TypeChanged(e) => {
                self.customer_type = e.new_type;
                self.updated_at = e.at;
            }
            CustomerEvent::VipStatusChanged(e) => {
                self.is_vip = e.is_vip;
                self.updated_at = e.at;
            }
            CustomerEvent::Deactivated(e) => {
                self.status = CustomerStatus::Inactive;
                self.updated_at = e.at;
            }
            CustomerEvent::Reactivated(e) => {
                self.status = CustomerStatus::Active;
                self.updated_at = e.at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CustomerCommand::UpdateContact {
                first_name,
                last_name,
                email,
                phone,
                notes,
                at,
            } => {
                self.validate_active()?;

                Ok(vec![CustomerEvent::ContactUpdated(CustomerContactUpdated {
                    first_name: required_text("first_name", first_name, NAME_MAX_LEN)?,
                    last_name: required_text("last_name", last_name, NAME_MAX_LEN)?,
                    email: email.clone(),
                    phone: phone.clone(),
                    notes: optional_text("notes", notes.as_deref(), NOTES_MAX_LEN)?,
                    at: *at,
                })])
            }

            CustomerCommand::ChangeAddress { address, at } => {
                self.validate_active()?;

                if &self.address == address {
                    return Ok(vec![]); // No change
                }

                Ok(vec![CustomerEvent::AddressChanged(CustomerAddressChanged {
                    old_address: self.address.clone(),
                    new_address: address.clone(),
                    at: *at,
                })])
            }

            CustomerCommand::ChangeType { customer_type, at } => {
                self.validate_active()?;

                if self.customer_type == *customer_type {
                    return Ok(vec![]);
                }

                Ok(vec![CustomerEvent::TypeChanged(CustomerTypeChanged {
                    old_type: self.customer_type,
                    new_type: *customer_type,
                    at: *at,
                })])
            }

            CustomerCommand::SetVip { is_vip, at } => {
                self.validate_active()?;

                if self.is_vip == *is_vip {
                    return Ok(vec![]);
                }

                Ok(vec![CustomerEvent::VipStatusChanged(CustomerVipStatusChanged {
                    is_vip: *is_vip,
                    at: *at,
                })])
            }

            CustomerCommand::Deactivate { reason, at } => {
                self.validate_active()?;

                Ok(vec![CustomerEvent::Deactivated(CustomerDeactivated {
                    reason: optional_text("reason", reason.as_deref(), NOTES_MAX_LEN)?,
                    at: *at,
                })])
            }

            CustomerCommand::Reactivate { at } => {
                if self.is_active() {
                    return Err(CustomerError::AlreadyActive);
                }

                Ok(vec![CustomerEvent::Reactivated(CustomerReactivated { at: *at })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.customer_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl FieldAccess for Customer {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.customer_id.into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "full_name" => self.full_name().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.as_ref()?.as_str().into(),
            "city" => self.address.city().into(),
            "country" => self.address.country().into(),
            "customer_type" => self.customer_type.as_str().into(),
            "status" => self.status.as_str().into(),
            "is_vip" => self.is_vip.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";
}

// ============================================================================
// Unit Tests
// ============================================================================
