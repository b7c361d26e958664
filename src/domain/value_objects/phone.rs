use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Validated phone number, kept in canonical form: an optional leading `+`
/// followed by digits only. Separators (space, `-`, `.`, parentheses) are
/// accepted on input and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required { field: "phone" });
        }

        let (international, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut canonical = String::with_capacity(trimmed.len());
        if international {
            canonical.push('+');
        }

        let mut digits = 0usize;
        for c in rest.chars() {
            match c {
                '0'..='9' => {
                    canonical.push(c);
                    digits += 1;
                }
                ' ' | '-' | '.' | '(' | ')' => {}
                '+' => {
                    return Err(ValidationError::InvalidFormat {
                        field: "phone",
                        reason: "'+' is only allowed as the first character",
                    })
                }
                _ => {
                    return Err(ValidationError::InvalidFormat {
                        field: "phone",
                        reason: "only digits, a leading '+' and separators are allowed",
                    })
                }
            }
        }

        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
            return Err(ValidationError::OutOfRange {
                field: "phone",
                reason: format!(
                    "expected {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits, got {digits}"
                ),
            });
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}
