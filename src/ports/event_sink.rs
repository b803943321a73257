//! PaymentEventSink port - Receiver of dispatched payment events.
//!
//! This is the seam where persistence or notification side effects attach.
//! The relay itself ships a logging sink and an in-memory recording sink.

use async_trait::async_trait;

use crate::domain::payment::{PaymentNotification, WebhookError};

/// Port for recording payment events after they have been verified and typed.
#[async_trait]
pub trait PaymentEventSink: Send + Sync {
    /// Record a single event.
    async fn record(&self, notification: &PaymentNotification) -> Result<(), WebhookError>;
}
