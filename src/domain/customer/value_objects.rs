use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Commercial relationship stage. Moves only through an explicit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CustomerType {
    #[default]
    Lead,
    Prospect,
    Client,
    Former,
}

impl CustomerType {
    pub const ALL: [CustomerType; 4] = [
        CustomerType::Lead,
        CustomerType::Prospect,
        CustomerType::Client,
        CustomerType::Former,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Lead => "Lead",
            CustomerType::Prospect => "Prospect",
            CustomerType::Client => "Client",
            CustomerType::Former => "Former",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the customer record is in use; independent of `CustomerType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
