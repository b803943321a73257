//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking
//! - Webhook verification outcome

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{CaptureId, OrderId};
use crate::domain::payment::{
    Link, OrderRequest, OrderResult, OrderStatus, PaymentError, PaymentLink, PaymentLinkRequest,
    RefundRequest, RefundResult, RefundStatus, TransmissionHeaders, WebhookEnvelope,
};
use crate::ports::PaymentProvider;

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Configure responses
/// mock.set_order(OrderResult::new(OrderId::new("O1")?, OrderStatus::Created));
///
/// // Inject errors
/// mock.set_method_error("refund_payment", PaymentError::provider(422, "declined"));
///
/// // Use in tests
/// let result = mock.create_order(request).await;
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Orders returned by confirm/status lookups, by id.
    orders: HashMap<String, OrderResult>,

    /// Webhook events returned by `get_webhook_event`, by id.
    webhook_events: HashMap<String, WebhookEnvelope>,

    /// Next order to return from `create_order`.
    next_order: Option<OrderResult>,

    /// Next refund to return.
    next_refund: Option<RefundResult>,

    /// Next payment link to return.
    next_payment_link: Option<PaymentLink>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Captured requests, for asserting on what would go over the wire.
    order_requests: Vec<OrderRequest>,
    refund_requests: Vec<RefundRequest>,

    /// Whether webhook verification succeeds.
    reject_webhooks: bool,

    /// Sequence for generated ids.
    sequence: u32,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the order to return on next `create_order` call.
    pub fn set_order(&self, order: OrderResult) {
        self.inner.lock().unwrap().next_order = Some(order);
    }

    /// Add an order to the "provider" for confirm/status lookups.
    pub fn add_order(&self, order: OrderResult) {
        let id = order.provider_id.to_string();
        self.inner.lock().unwrap().orders.insert(id, order);
    }

    /// Set the refund to return on next `refund_payment` call.
    pub fn set_refund(&self, refund: RefundResult) {
        self.inner.lock().unwrap().next_refund = Some(refund);
    }

    /// Set the payment link to return on next `create_payment_link` call.
    pub fn set_payment_link(&self, link: PaymentLink) {
        self.inner.lock().unwrap().next_payment_link = Some(link);
    }

    /// Add a webhook event retrievable by id.
    pub fn add_webhook_event(&self, event: WebhookEnvelope) {
        let id = event.id.clone();
        self.inner.lock().unwrap().webhook_events.insert(id, event);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Total number of provider calls made.
    pub fn total_calls(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Order requests received by `create_order`, in call order.
    pub fn order_requests(&self) -> Vec<OrderRequest> {
        self.inner.lock().unwrap().order_requests.clone()
    }

    /// Refund requests received by `refund_payment`, in call order.
    pub fn refund_requests(&self) -> Vec<RefundRequest> {
        self.inner.lock().unwrap().refund_requests.clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.inner.lock().unwrap();
        state.sequence += 1;
        format!("{}{}", prefix, state.sequence)
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_order(&self, request: OrderRequest) -> Result<OrderResult, PaymentError> {
        self.record_call(
            "create_order",
            vec![request.amount.to_major_string(), request.amount.currency().to_string()],
        );
        self.inner.lock().unwrap().order_requests.push(request.clone());
        self.check_error("create_order")?;

        if let Some(order) = self.inner.lock().unwrap().next_order.take() {
            return Ok(order);
        }

        let id = OrderId::new(self.next_id("ORDER-"))?;
        let mut order = OrderResult::new(id.clone(), OrderStatus::Created);
        order.links = vec![Link {
            rel: "approve".to_string(),
            href: format!("https://www.sandbox.paypal.com/checkoutnow?token={}", id),
            method: Some("GET".to_string()),
        }];
        order.amount = Some(request.amount);
        Ok(order)
    }

    async fn confirm_order(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError> {
        self.record_call("confirm_order", vec![order_id.to_string()]);
        self.check_error("confirm_order")?;

        let existing = self.inner.lock().unwrap().orders.get(order_id.as_str()).cloned();
        let mut order = existing.ok_or_else(|| {
            PaymentError::provider(422, format!("Order {} cannot be captured", order_id))
        })?;

        order.status = OrderStatus::Completed;
        if order.capture_id.is_none() {
            order.capture_id = Some(CaptureId::new(self.next_id("CAPTURE-"))?);
        }
        self.add_order(order.clone());
        Ok(order)
    }

    async fn get_order_status(&self, order_id: &OrderId) -> Result<OrderResult, PaymentError> {
        self.record_call("get_order_status", vec![order_id.to_string()]);
        self.check_error("get_order_status")?;

        self.inner
            .lock()
            .unwrap()
            .orders
            .get(order_id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found(format!("Order {}", order_id)))
    }

    async fn refund_payment(&self, request: RefundRequest) -> Result<RefundResult, PaymentError> {
        self.record_call(
            "refund_payment",
            vec![request.capture_id.to_string(), request.amount.to_major_string()],
        );
        self.inner.lock().unwrap().refund_requests.push(request.clone());
        self.check_error("refund_payment")?;

        if let Some(refund) = self.inner.lock().unwrap().next_refund.take() {
            return Ok(refund);
        }

        Ok(RefundResult {
            refund_id: self.next_id("REFUND-"),
            status: RefundStatus::Completed,
            links: Vec::new(),
        })
    }

    async fn create_payment_link(
        &self,
        request: PaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError> {
        self.record_call(
            "create_payment_link",
            vec![request.amount.to_major_string(), request.amount.currency().to_string()],
        );
        self.check_error("create_payment_link")?;

        if let Some(link) = self.inner.lock().unwrap().next_payment_link.take() {
            return Ok(link);
        }

        let invoice_id = self.next_id("INV2-");
        Ok(PaymentLink {
            payment_link: Some(format!(
                "https://www.sandbox.paypal.com/invoice/p/#{}",
                invoice_id
            )),
            invoice_id,
            status: "SENT".to_string(),
            links: Vec::new(),
            send_confirmed: true,
        })
    }

    async fn verify_webhook_signature(
        &self,
        webhook_id: &str,
        _raw_body: &[u8],
        headers: &TransmissionHeaders,
    ) -> bool {
        self.record_call(
            "verify_webhook_signature",
            vec![webhook_id.to_string(), headers.transmission_id.clone()],
        );
        !self.inner.lock().unwrap().reject_webhooks
    }

    async fn get_webhook_event(&self, event_id: &str) -> Result<WebhookEnvelope, PaymentError> {
        self.record_call("get_webhook_event", vec![event_id.to_string()]);
        self.check_error("get_webhook_event")?;

        self.inner
            .lock()
            .unwrap()
            .webhook_events
            .get(event_id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found(format!("Webhook event {}", event_id)))
    }
}
