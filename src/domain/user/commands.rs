use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::LockoutPolicy;
use crate::domain::value_objects::{Email, Role};

// ============================================================================
// User Domain Commands
// ============================================================================

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub user_id: Uuid,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum UserCommand {
    RecordLogin {
        success: bool,
        at: DateTime<Utc>,
        policy: LockoutPolicy,
    },
    Unlock {
        at: DateTime<Utc>,
    },
    UpdateProfile {
        first_name: String,
        last_name: String,
        at: DateTime<Utc>,
    },
    ChangeEmail {
        email: Email,
        at: DateTime<Utc>,
    },
    ChangeRole {
        role: Role,
        at: DateTime<Utc>,
    },
    Deactivate {
        at: DateTime<Utc>,
    },
    Reactivate {
        at: DateTime<Utc>,
    },
    Delete {
        at: DateTime<Utc>,
    },
}
