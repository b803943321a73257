//! Default event sink: structured log line per event.

use async_trait::async_trait;

use crate::domain::payment::{PaymentNotification, WebhookError};
use crate::ports::PaymentEventSink;

/// Sink that only logs. Used when no persistence is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventSink;

impl LoggingEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentEventSink for LoggingEventSink {
    async fn record(&self, notification: &PaymentNotification) -> Result<(), WebhookError> {
        tracing::info!(
            event_id = %notification.id,
            event_type = %notification.event_type,
            create_time = %notification.create_time,
            summary = notification.summary.as_deref().unwrap_or(""),
            "Payment event recorded"
        );
        Ok(())
    }
}
