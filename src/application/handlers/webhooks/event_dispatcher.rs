//! EventDispatcher - Verify, parse and route inbound webhook deliveries.
//!
//! Every failure is recovered into a [`WebhookOutcome`]; nothing propagates
//! to the HTTP layer. Deliveries are processed as they arrive, duplicates
//! included.

use crate::domain::payment::{
    DispatchOutcome, HandlerRegistry, PaymentError, PaymentNotification, TransmissionHeaders,
    WebhookEnvelope, WebhookError,
};

use super::WebhookVerifier;

/// Result returned to the webhook sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    pub accepted: bool,
    pub message: String,
}

impl WebhookOutcome {
    fn accepted(event_type: &str) -> Self {
        Self {
            accepted: true,
            message: format!("Event {} processed successfully", event_type),
        }
    }

    fn rejected(error: &WebhookError) -> Self {
        Self {
            accepted: false,
            message: error.outcome_message().to_string(),
        }
    }
}

pub struct EventDispatcher {
    verifier: WebhookVerifier,
    registry: HandlerRegistry,
}

impl EventDispatcher {
    pub fn new(verifier: WebhookVerifier, registry: HandlerRegistry) -> Self {
        Self { verifier, registry }
    }

    /// Processes one webhook delivery.
    pub async fn handle(&self, raw_body: &[u8], headers: &TransmissionHeaders) -> WebhookOutcome {
        if !self.verifier.verify(raw_body, headers).await {
            tracing::warn!(
                transmission_id = %headers.transmission_id,
                "Invalid webhook signature received"
            );
            return WebhookOutcome::rejected(&WebhookError::VerificationFailed);
        }

        let envelope = match WebhookEnvelope::parse(raw_body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let error = WebhookError::ParseError(e.to_string());
                tracing::error!(error = %error, "Error processing webhook");
                return WebhookOutcome::rejected(&error);
            }
        };

        self.route(&envelope).await
    }

    /// Re-runs the handlers for an event fetched back from the provider.
    ///
    /// The event comes straight from PayPal's API, so no signature check
    /// applies.
    pub async fn replay(&self, event_id: &str) -> Result<WebhookOutcome, PaymentError> {
        let envelope = self.verifier.provider().get_webhook_event(event_id).await?;
        tracing::info!(event_id = %envelope.id, event_type = %envelope.event_type, "Replaying webhook event");
        Ok(self.route(&envelope).await)
    }

    async fn route(&self, envelope: &WebhookEnvelope) -> WebhookOutcome {
        let notification = PaymentNotification::from_envelope(envelope);

        tracing::info!(
            event_id = %notification.id,
            event_type = %notification.event_type,
            "Processing webhook event"
        );

        match self.registry.dispatch(&notification).await {
            DispatchOutcome::Handled => {}
            DispatchOutcome::Unhandled => {
                tracing::info!(event_type = %notification.event_type, "Unhandled event type");
            }
            DispatchOutcome::Failed(error) => {
                tracing::error!(
                    event_id = %notification.id,
                    event_type = %notification.event_type,
                    error = %error,
                    "Webhook handler failed"
                );
            }
        }

        WebhookOutcome::accepted(&notification.event_type)
    }
}
