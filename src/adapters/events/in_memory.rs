//! In-memory event sink implementation for testing.
//!
//! Records every event it receives so tests can assert on what the webhook
//! pipeline delivered.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::payment::{PaymentEventKind, PaymentNotification, WebhookError};
use crate::ports::PaymentEventSink;

/// Recording event sink.
///
/// # Example
///
/// ```ignore
/// let sink = Arc::new(InMemoryEventSink::new());
/// dispatcher.handle(body, &headers).await;
/// assert_eq!(sink.event_count(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryEventSink {
    recorded: RwLock<Vec<PaymentNotification>>,
    fail_with: RwLock<Option<String>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every event with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            recorded: RwLock::new(Vec::new()),
            fail_with: RwLock::new(Some(message.into())),
        }
    }

    // === Test Helpers ===

    /// Returns all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn recorded(&self) -> Vec<PaymentNotification> {
        self.recorded
            .read()
            .expect("InMemoryEventSink: recorded lock poisoned")
            .clone()
    }

    /// Returns recorded events of a specific kind.
    pub fn events_of_kind(&self, kind: PaymentEventKind) -> Vec<PaymentNotification> {
        self.recorded()
            .into_iter()
            .filter(|n| n.kind() == Some(kind))
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.recorded
            .read()
            .expect("InMemoryEventSink: recorded lock poisoned")
            .len()
    }

    pub fn clear(&self) {
        self.recorded
            .write()
            .expect("InMemoryEventSink: recorded lock poisoned")
            .clear();
    }
}

#[async_trait]
impl PaymentEventSink for InMemoryEventSink {
    async fn record(&self, notification: &PaymentNotification) -> Result<(), WebhookError> {
        self.recorded
            .write()
            .expect("InMemoryEventSink: recorded lock poisoned")
            .push(notification.clone());

        let failure = self
            .fail_with
            .read()
            .expect("InMemoryEventSink: fail lock poisoned")
            .clone();
        match failure {
            Some(message) => Err(WebhookError::Handler(message)),
            None => Ok(()),
        }
    }
}
