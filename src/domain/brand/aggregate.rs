use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::commands::{BrandCommand, CreateBrand};
use super::errors::BrandError;
use super::events::*;
use crate::domain::value_objects::{optional_text, required_text};
use crate::shared::{Aggregate, FieldAccess, FieldValue};
use crate::store::Entity;

pub const BRAND_NAME_MAX_LEN: usize = 100;
pub const BRAND_DESCRIPTION_MAX_LEN: usize = 1000;

// ============================================================================
// Brand Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brand {
    brand_id: Uuid,
    version: i64,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Brand {
    pub fn create(command: &CreateBrand) -> Result<Self, BrandError> {
        let event = BrandEvent::Created(BrandCreated {
            brand_id: command.brand_id,
            name: required_text("name", &command.name, BRAND_NAME_MAX_LEN)?,
            description: optional_text(
                "description",
                command.description.as_deref(),
                BRAND_DESCRIPTION_MAX_LEN,
            )?,
            at: command.at,
        });
        Self::apply_first_event(&event)
    }

    pub fn id(&self) -> Uuid {
        self.brand_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Aggregate for Brand {
    type Event = BrandEvent;
    type Command = BrandCommand;
    type Error = BrandError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            BrandEvent::Created(e) => Ok(Self {
                brand_id: e.brand_id,
                version: 1,
                name: e.name.clone(),
                description: e.description.clone(),
                is_active: true,
                created_at: e.at,
                updated_at: e.at,
            }),
            _ => Err(BrandError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            BrandEvent::Created(_) => {}
            BrandEvent::Renamed(e) => {
                self.name = e.new_name.clone();
                self.updated_at = e.at;
            }
            BrandEvent::Deactivated(e) => {
                self.is_active = false;
                self.updated_at = e.at;
            }
            BrandEvent::Reactivated(e) => {
                self.is_active = true;
                self.updated_at = e.at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            BrandCommand::Rename { name, at } => {
                if !self.is_active {
                    return Err(BrandError::Inactive);
                }
                let new_name = required_text("name", name, BRAND_NAME_MAX_LEN)?;
                if new_name == self.name {
                    return Ok(vec![]);
                }
                Ok(vec![BrandEvent::Renamed(BrandRenamed {
                    old_name: self.name.clone(),
                    new_name,
                    at: *at,
                })])
            }

            BrandCommand::Deactivate { at } => {
                if !self.is_active {
                    return Ok(vec![]);
                }
                Ok(vec![BrandEvent::Deactivated(BrandStatusChanged { at: *at })])
            }

            BrandCommand::Reactivate { at } => {
                if self.is_active {
                    return Ok(vec![]);
                }
                Ok(vec![BrandEvent::Reactivated(BrandStatusChanged { at: *at })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.brand_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl FieldAccess for Brand {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.brand_id.into()),
            "name" => Some(self.name.as_str().into()),
            "description" => self.description.as_deref().map(FieldValue::from),
            "is_active" => Some(self.is_active.into()),
            "created_at" => Some(self.created_at.into()),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl Entity for Brand {
    const NAME: &'static str = "Brand";
}
