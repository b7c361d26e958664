use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// Application role. Closed set; parsing is case-sensitive against the
/// canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        match raw.as_ref() {
            "Admin" => Ok(Role::Admin),
            "Manager" => Ok(Role::Manager),
            "User" => Ok(Role::User),
            other => Err(ValidationError::not_allowed("role", other, &SystemRoles::NAMES)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }

    /// Admins and managers may manage other accounts
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Role {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// The fixed, process-wide set of roles
pub struct SystemRoles;

impl SystemRoles {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::User];
    pub const NAMES: [&'static str; 3] = ["Admin", "Manager", "User"];

    pub fn is_valid(raw: &str) -> bool {
        Self::ALL.iter().any(|role| role.as_str() == raw)
    }
}
