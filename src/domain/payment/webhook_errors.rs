//! Webhook error types.
//!
//! These never escape the dispatcher: each one is recovered into a
//! `WebhookOutcome` with the message the provider-facing contract expects.

use thiserror::Error;

/// Errors that occur while processing an inbound webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The provider did not confirm the transmission signature.
    #[error("Invalid webhook signature")]
    VerificationFailed,

    /// The body was not a well-formed webhook envelope.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A registered handler failed. Logged, never changes the outcome.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl WebhookError {
    /// Message returned to the webhook sender for this failure.
    pub fn outcome_message(&self) -> &'static str {
        match self {
            WebhookError::VerificationFailed => "Invalid webhook signature",
            WebhookError::ParseError(_) | WebhookError::Handler(_) => "Error processing webhook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failed_displays_correctly() {
        assert_eq!(
            WebhookError::VerificationFailed.to_string(),
            "Invalid webhook signature"
        );
    }

    #[test]
    fn parse_error_hides_cause_from_sender() {
        let err = WebhookError::ParseError("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "Parse error: expected value at line 1");
        assert_eq!(err.outcome_message(), "Error processing webhook");
    }
}
