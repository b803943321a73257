//! Error types for value object construction.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    EmptyField { field: String },

    #[error("Field '{field}' must be greater than zero, got {actual}")]
    NotPositive { field: String, actual: i64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates a non-positive amount validation error.
    pub fn not_positive(field: impl Into<String>, actual: i64) -> Self {
        ValidationError::NotPositive {
            field: field.into(),
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_correctly() {
        let err = ValidationError::empty_field("amount");
        assert_eq!(format!("{}", err), "Field 'amount' is required");
    }

    #[test]
    fn not_positive_displays_actual_value() {
        let err = ValidationError::not_positive("amount", -5);
        assert_eq!(
            format!("{}", err),
            "Field 'amount' must be greater than zero, got -5"
        );
    }

    #[test]
    fn invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("currency", "expected 3 letters");
        assert_eq!(
            format!("{}", err),
            "Field 'currency' has invalid format: expected 3 letters"
        );
    }

    #[test]
    fn field_returns_offending_field_name() {
        assert_eq!(ValidationError::empty_field("order_id").field(), "order_id");
        assert_eq!(ValidationError::not_positive("amount", 0).field(), "amount");
    }
}
