//! WebhookVerifier - Delegates authenticity checks to the payment provider.
//!
//! No local cryptography: PayPal's verification endpoint is the authority.

use std::sync::Arc;

use crate::domain::payment::TransmissionHeaders;
use crate::ports::PaymentProvider;

#[derive(Clone)]
pub struct WebhookVerifier {
    provider: Arc<dyn PaymentProvider>,
    webhook_id: String,
}

impl WebhookVerifier {
    pub fn new(provider: Arc<dyn PaymentProvider>, webhook_id: impl Into<String>) -> Self {
        Self {
            provider,
            webhook_id: webhook_id.into(),
        }
    }

    /// True only when the provider confirms the delivery is authentic.
    pub async fn verify(&self, raw_body: &[u8], headers: &TransmissionHeaders) -> bool {
        if !headers.is_complete() {
            tracing::debug!("Webhook delivery is missing transmission headers");
        }
        self.provider
            .verify_webhook_signature(&self.webhook_id, raw_body, headers)
            .await
    }

    pub(crate) fn provider(&self) -> &Arc<dyn PaymentProvider> {
        &self.provider
    }
}
