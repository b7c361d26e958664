use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Email, Role};
use crate::shared::DomainEvent;

// ============================================================================
// User Domain Events
// ============================================================================

/// Union type for all user events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UserEvent {
    Registered(UserRegistered),
    LoginSucceeded(UserLoginSucceeded),
    LoginFailed(UserLoginFailed),
    LockedOut(UserLockedOut),
    Unlocked(UserUnlocked),
    ProfileUpdated(UserProfileUpdated),
    EmailChanged(UserEmailChanged),
    RoleChanged(UserRoleChanged),
    Deactivated(UserDeactivated),
    Reactivated(UserReactivated),
    Deleted(UserDeleted),
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Registered(_) => "UserRegistered",
            UserEvent::LoginSucceeded(_) => "UserLoginSucceeded",
            UserEvent::LoginFailed(_) => "UserLoginFailed",
            UserEvent::LockedOut(_) => "UserLockedOut",
            UserEvent::Unlocked(_) => "UserUnlocked",
            UserEvent::ProfileUpdated(_) => "UserProfileUpdated",
            UserEvent::EmailChanged(_) => "UserEmailChanged",
            UserEvent::RoleChanged(_) => "UserRoleChanged",
            UserEvent::Deactivated(_) => "UserDeactivated",
            UserEvent::Reactivated(_) => "UserReactivated",
            UserEvent::Deleted(_) => "UserDeleted",
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRegistered {
    pub user_id: Uuid,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLoginSucceeded {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLoginFailed {
    /// Consecutive failures including this one
    pub failed_attempts: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLockedOut {
    pub until: DateTime<Utc>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUnlocked {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileUpdated {
    pub first_name: String,
    pub last_name: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEmailChanged {
    pub old_email: Email,
    pub new_email: Email,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRoleChanged {
    pub old_role: Role,
    pub new_role: Role,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDeactivated {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReactivated {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDeleted {
    pub at: DateTime<Utc>,
}
