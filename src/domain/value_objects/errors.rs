// ============================================================================
// Validation Errors
// ============================================================================

/// Malformed input rejected at the boundary, naming the field and the rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} is not valid: {reason}")]
    InvalidFormat { field: &'static str, reason: &'static str },

    #[error("{field} must be one of {allowed} (got '{value}')")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }

    pub(crate) fn not_allowed(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

/// Trim `value` and require it to be non-empty and at most `max` characters
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but blank input means "absent"
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(field, text, max).map(Some),
    }
}
