//! Strongly-typed identifier value objects.
//!
//! Provider identifiers are opaque strings issued by PayPal. They end up in
//! outbound URL paths, so construction restricts them to the characters PayPal
//! actually uses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

fn validate_provider_id(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid_format(
            field,
            "must contain only letters, digits, '-' or '_'",
        ));
    }
    Ok(trimmed.to_string())
}

/// PayPal checkout order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_provider_id("order_id", raw.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// PayPal capture identifier, the target of refunds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaptureId(String);

impl CaptureId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_provider_id("capture_id", raw.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CaptureId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CaptureId> for String {
    fn from(id: CaptureId) -> Self {
        id.0
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_trims_whitespace() {
        let id = OrderId::new("  5O190127TN364715T ").unwrap();
        assert_eq!(id.as_str(), "5O190127TN364715T");
    }

    #[test]
    fn order_id_rejects_empty() {
        let err = OrderId::new("   ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("order_id"));
    }

    #[test]
    fn ids_reject_path_characters() {
        assert!(OrderId::new("abc/../refund").is_err());
        assert!(CaptureId::new("cap?x=1").is_err());
    }

    #[test]
    fn capture_id_accepts_provider_format() {
        let id = CaptureId::new("3C679366HH908993F").unwrap();
        assert_eq!(id.to_string(), "3C679366HH908993F");
    }

    #[test]
    fn capture_id_reports_its_field() {
        assert_eq!(CaptureId::new("").unwrap_err().field(), "capture_id");
    }

    #[test]
    fn ids_deserialize_through_validation() {
        let id: OrderId = serde_json::from_str("\"O1\"").unwrap();
        assert_eq!(id.as_str(), "O1");
        assert!(serde_json::from_str::<OrderId>("\"\"").is_err());
    }
}
