//! ObservingEventHandler - Default handler for every known payment event.
//!
//! Logs the structured fields of the typed resource and forwards the event
//! to the configured sink.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::payment::{
    PaymentEvent, PaymentEventHandler, PaymentEventKind, PaymentNotification, ProviderAmount,
    WebhookError,
};
use crate::ports::PaymentEventSink;

pub struct ObservingEventHandler {
    sink: Arc<dyn PaymentEventSink>,
}

impl ObservingEventHandler {
    pub fn new(sink: Arc<dyn PaymentEventSink>) -> Self {
        Self { sink }
    }

    fn log_event(notification: &PaymentNotification) {
        let event_id = notification.id.as_str();
        match &notification.event {
            PaymentEvent::OrderCompleted(order) | PaymentEvent::OrderApproved(order) => {
                tracing::info!(
                    event_id,
                    event_type = %notification.event_type,
                    order_id = order.id.as_deref().unwrap_or(""),
                    status = order.status.as_deref().unwrap_or(""),
                    amount = %display_amount(order.amount()),
                    "Order event"
                );
            }
            PaymentEvent::CaptureCompleted(capture) | PaymentEvent::CaptureDenied(capture) => {
                tracing::info!(
                    event_id,
                    event_type = %notification.event_type,
                    capture_id = capture.id.as_deref().unwrap_or(""),
                    status = capture.status.as_deref().unwrap_or(""),
                    amount = %display_amount(capture.amount.as_ref()),
                    "Capture event"
                );
            }
            PaymentEvent::CaptureRefunded(refund) => {
                tracing::info!(
                    event_id,
                    refund_id = refund.id.as_deref().unwrap_or(""),
                    status = refund.status.as_deref().unwrap_or(""),
                    amount = %display_amount(refund.amount.as_ref()),
                    "Capture refunded"
                );
            }
            PaymentEvent::SubscriptionCreated(subscription)
            | PaymentEvent::SubscriptionUpdated(subscription)
            | PaymentEvent::SubscriptionCancelled(subscription) => {
                tracing::info!(
                    event_id,
                    event_type = %notification.event_type,
                    subscription_id = subscription.id.as_deref().unwrap_or(""),
                    status = subscription.status.as_deref().unwrap_or(""),
                    plan_id = subscription.plan_id.as_deref().unwrap_or(""),
                    "Subscription event"
                );
            }
            PaymentEvent::Unknown { event_type } => {
                tracing::debug!(event_id, event_type = %event_type, "Unknown payment event");
            }
        }
    }
}

fn display_amount(amount: Option<&ProviderAmount>) -> String {
    match amount.and_then(|a| a.to_money()) {
        Some(money) => money.to_string(),
        None => "-".to_string(),
    }
}

#[async_trait]
impl PaymentEventHandler for ObservingEventHandler {
    fn handles(&self) -> Vec<PaymentEventKind> {
        PaymentEventKind::ALL.to_vec()
    }

    async fn handle(&self, notification: &PaymentNotification) -> Result<(), WebhookError> {
        Self::log_event(notification);
        self.sink.record(notification).await
    }
}
