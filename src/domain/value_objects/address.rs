use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{required_text, ValidationError};

pub const ADDRESS_FIELD_MAX_LEN: usize = 100;

/// Unvalidated address parts as they arrive from callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

/// Postal address. All four parts are required; there is no partial address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressParts", into = "AddressParts")]
pub struct Address {
    street: String,
    city: String,
    zip_code: String,
    country: String,
}

impl Address {
    pub fn new(
        street: impl AsRef<str>,
        city: impl AsRef<str>,
        zip_code: impl AsRef<str>,
        country: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            street: required_text("street", street.as_ref(), ADDRESS_FIELD_MAX_LEN)?,
            city: required_text("city", city.as_ref(), ADDRESS_FIELD_MAX_LEN)?,
            zip_code: required_text("zip_code", zip_code.as_ref(), ADDRESS_FIELD_MAX_LEN)?,
            country: required_text("country", country.as_ref(), ADDRESS_FIELD_MAX_LEN)?,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}, {}", self.street, self.zip_code, self.city, self.country)
    }
}

impl TryFrom<AddressParts> for Address {
    type Error = ValidationError;

    fn try_from(parts: AddressParts) -> Result<Self, Self::Error> {
        Self::new(parts.street, parts.city, parts.zip_code, parts.country)
    }
}

impl From<Address> for AddressParts {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}
