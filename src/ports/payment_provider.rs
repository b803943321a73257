//! Payment provider port for outbound payment operations.
//!
//! Defines the contract for the PayPal REST integration. Implementations
//! handle authentication, transport, and mapping of provider responses into
//! domain types.
//!
//! # Design
//!
//! - **No cancel primitive**: PayPal cannot cancel an order, so the port has
//!   no such operation and cancellation never reaches the provider.
//! - **Fail-closed verification**: signature verification reports `false` for
//!   every failure instead of an error.

use async_trait::async_trait;

use crate::domain::foundation::OrderId;
use crate::domain::payment::{
    OrderRequest, OrderResult, PaymentError, PaymentLink, PaymentLinkRequest, RefundRequest,
    RefundResult, TransmissionHeaders, WebhookEnvelope,
};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a checkout order with intent CAPTURE.
    async fn create_order(&self, request: OrderRequest) -> Result<OrderResult, PaymentError>;

    /// Capture an approved order.
    ///
    /// The capture id is `None` when the provider response carries none.
    async fn confirm_order(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError>;

    /// Look up an order. Any failure is reported as `NotFound`.
    async fn get_order_status(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError>;

    /// Refund a capture, fully or partially.
    async fn refund_payment(&self, request: RefundRequest) -> Result<RefundResult, PaymentError>;

    /// Create an invoice and send it, yielding a shareable payment link.
    async fn create_payment_link(
        &self,
        request: PaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError>;

    /// Ask the provider whether a webhook delivery is authentic.
    ///
    /// Returns `true` only on an explicit provider confirmation.
    async fn verify_webhook_signature(
        &self,
        webhook_id: &str,
        raw_body: &[u8],
        headers: &TransmissionHeaders,
    ) -> bool;

    /// Fetch a previously delivered webhook event by id.
    async fn get_webhook_event(&self, event_id: &str) -> Result<WebhookEnvelope, PaymentError>;
}
