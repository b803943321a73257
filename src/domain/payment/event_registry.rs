//! Routing of typed payment events to their handlers.
//!
//! The registry is a lookup table from [`PaymentEventKind`] to a handler.
//! Handlers declare the kinds they process; registering a second handler for
//! the same kind replaces the first.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{PaymentEventKind, PaymentNotification, WebhookError};

/// Handler for one or more payment event kinds.
#[async_trait]
pub trait PaymentEventHandler: Send + Sync {
    /// Returns the event kind(s) this handler processes.
    fn handles(&self) -> Vec<PaymentEventKind>;

    /// Handles the event. Errors are logged by the caller and never change
    /// the webhook outcome.
    async fn handle(&self, notification: &PaymentNotification) -> Result<(), WebhookError>;
}

/// What happened when an event was routed through the registry.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A handler ran and succeeded.
    Handled,
    /// No handler is registered for this event (including unknown types).
    Unhandled,
    /// A handler ran and failed.
    Failed(WebhookError),
}

/// Lookup table from event kind to handler.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<PaymentEventKind, Arc<dyn PaymentEventHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every kind it reports via `handles()`.
    pub fn with_handler(mut self, handler: Arc<dyn PaymentEventHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn register(&mut self, handler: Arc<dyn PaymentEventHandler>) {
        for kind in handler.handles() {
            self.handlers.insert(kind, Arc::clone(&handler));
        }
    }

    /// Finds the handler registered for `kind`.
    pub fn get(&self, kind: PaymentEventKind) -> Option<&Arc<dyn PaymentEventHandler>> {
        self.handlers.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Routes the notification to its handler, if any.
    pub async fn dispatch(&self, notification: &PaymentNotification) -> DispatchOutcome {
        let handler = match notification.kind().and_then(|kind| self.get(kind)) {
            Some(handler) => handler,
            None => return DispatchOutcome::Unhandled,
        };

        match handler.handle(notification).await {
            Ok(()) => DispatchOutcome::Handled,
            Err(err) => DispatchOutcome::Failed(err),
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&'static str> = self.handlers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("HandlerRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentEvent, SubscriptionResource};
    use chrono::Utc;
    use std::sync::Mutex;

    struct RecordingHandler {
        kinds: Vec<PaymentEventKind>,
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingHandler {
        fn new(kinds: Vec<PaymentEventKind>) -> Self {
            Self {
                kinds,
                seen: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing(kinds: Vec<PaymentEventKind>) -> Self {
            Self {
                fail: true,
                ..Self::new(kinds)
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentEventHandler for RecordingHandler {
        fn handles(&self) -> Vec<PaymentEventKind> {
            self.kinds.clone()
        }

        async fn handle(&self, notification: &PaymentNotification) -> Result<(), WebhookError> {
            self.seen.lock().unwrap().push(notification.id.clone());
            if self.fail {
                return Err(WebhookError::Handler("boom".to_string()));
            }
            Ok(())
        }
    }

    fn notification(event: PaymentEvent) -> PaymentNotification {
        let event_type = event
            .kind()
            .map(|k| k.as_str().to_string())
            .unwrap_or_else(|| "SOMETHING.ELSE".to_string());
        PaymentNotification {
            id: "WH-1".to_string(),
            event_type,
            create_time: Utc::now(),
            summary: None,
            event,
        }
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let handler = Arc::new(RecordingHandler::new(vec![
            PaymentEventKind::SubscriptionCreated,
        ]));
        let registry = HandlerRegistry::new().with_handler(handler.clone());

        let outcome = registry
            .dispatch(&notification(PaymentEvent::SubscriptionCreated(
                SubscriptionResource::default(),
            )))
            .await;

        assert!(matches!(outcome, DispatchOutcome::Handled));
        assert_eq!(handler.seen(), vec!["WH-1".to_string()]);
    }

    #[tokio::test]
    async fn unknown_event_is_unhandled() {
        let handler = Arc::new(RecordingHandler::new(PaymentEventKind::ALL.to_vec()));
        let registry = HandlerRegistry::new().with_handler(handler.clone());

        let outcome = registry
            .dispatch(&notification(PaymentEvent::Unknown {
                event_type: "SOMETHING.ELSE".to_string(),
            }))
            .await;

        assert!(matches!(outcome, DispatchOutcome::Unhandled));
        assert!(handler.seen().is_empty());
    }

    #[tokio::test]
    async fn unregistered_kind_is_unhandled() {
        let registry = HandlerRegistry::new();
        let outcome = registry
            .dispatch(&notification(PaymentEvent::SubscriptionUpdated(
                SubscriptionResource::default(),
            )))
            .await;
        assert!(matches!(outcome, DispatchOutcome::Unhandled));
    }

    #[tokio::test]
    async fn handler_failure_is_reported() {
        let handler = Arc::new(RecordingHandler::failing(vec![
            PaymentEventKind::SubscriptionCancelled,
        ]));
        let registry = HandlerRegistry::new().with_handler(handler);

        let outcome = registry
            .dispatch(&notification(PaymentEvent::SubscriptionCancelled(
                SubscriptionResource::default(),
            )))
            .await;

        assert!(matches!(outcome, DispatchOutcome::Failed(WebhookError::Handler(_))));
    }

    #[test]
    fn one_handler_covers_all_kinds() {
        let handler = Arc::new(RecordingHandler::new(PaymentEventKind::ALL.to_vec()));
        let registry = HandlerRegistry::new().with_handler(handler);
        assert_eq!(registry.len(), 8);
    }
}
