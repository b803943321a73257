//! Error types for payment provider operations.
//!
//! Every outbound call and every facade operation reports failure through
//! [`PaymentError`]. The HTTP adapter maps each variant to a status code.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors from payment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Client-credentials exchange failed; no bearer token available.
    #[error("Authentication with payment provider failed: {0}")]
    Auth(String),

    /// The provider answered, but not with a usable success response.
    #[error("{message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// The referenced provider resource does not exist or could not be read.
    #[error("{0} not found")]
    NotFound(String),

    /// Caller input rejected before any provider call.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Provider call exceeded the configured request timeout.
    #[error("Payment provider did not respond within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure reaching the provider.
    #[error("Network error: {0}")]
    Network(String),
}

impl PaymentError {
    pub fn auth(message: impl Into<String>) -> Self {
        PaymentError::Auth(message.into())
    }

    /// Provider failure carrying the HTTP status it answered with.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        PaymentError::Provider {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Provider failure without a meaningful HTTP status (e.g. malformed body).
    pub fn provider_message(message: impl Into<String>) -> Self {
        PaymentError::Provider {
            status: None,
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        PaymentError::NotFound(resource.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        PaymentError::Network(message.into())
    }

    /// Stable machine-readable code for logs and API bodies.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::Auth(_) => "PROVIDER_AUTH_FAILED",
            PaymentError::Provider { .. } => "PROVIDER_ERROR",
            PaymentError::NotFound(_) => "NOT_FOUND",
            PaymentError::Validation { .. } => "VALIDATION_FAILED",
            PaymentError::Timeout { .. } => "PROVIDER_TIMEOUT",
            PaymentError::Network(_) => "NETWORK_ERROR",
        }
    }

    /// Informational only; nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Timeout { .. } | PaymentError::Network(_) => true,
            PaymentError::Provider {
                status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }

    /// Maps the error to the status the HTTP boundary answers with.
    ///
    /// Provider-side refusals surface as 400 to match the relay's public
    /// contract; infrastructure failures surface as gateway errors.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Validation { .. } | PaymentError::Provider { .. } => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::Auth(_) | PaymentError::Network(_) => StatusCode::BAD_GATEWAY,
            PaymentError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        PaymentError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn provider_error_displays_message_only() {
        let err = PaymentError::provider(422, "UNPROCESSABLE_ENTITY: amount mismatch");
        assert_eq!(err.to_string(), "UNPROCESSABLE_ENTITY: amount mismatch");
    }

    #[test]
    fn timeout_displays_seconds() {
        let err = PaymentError::Timeout { timeout_secs: 30 };
        assert_eq!(
            err.to_string(),
            "Payment provider did not respond within 30s"
        );
    }

    #[test]
    fn not_found_names_resource() {
        assert_eq!(PaymentError::not_found("Order O1").to_string(), "Order O1 not found");
    }

    // ══════════════════════════════════════════════════════════════
    // Status mapping
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn validation_and_provider_map_to_bad_request() {
        assert_eq!(
            PaymentError::validation("amount", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PaymentError::provider(422, "nope").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn infrastructure_failures_map_to_gateway_codes() {
        assert_eq!(PaymentError::auth("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            PaymentError::Timeout { timeout_secs: 1 }.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn retryability_follows_failure_kind() {
        assert!(PaymentError::network("reset").is_retryable());
        assert!(PaymentError::provider(503, "down").is_retryable());
        assert!(!PaymentError::provider(400, "bad").is_retryable());
        assert!(!PaymentError::validation("amount", "bad").is_retryable());
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: PaymentError = ValidationError::empty_field("currency").into();
        match err {
            PaymentError::Validation { field, message } => {
                assert_eq!(field, "currency");
                assert_eq!(message, "Field 'currency' is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
