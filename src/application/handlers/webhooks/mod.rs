//! Webhook handlers.
//!
//! Verification, parsing and dispatch of inbound PayPal event deliveries.

mod event_dispatcher;
mod observing_handler;
mod webhook_verifier;

pub use event_dispatcher::{EventDispatcher, WebhookOutcome};
pub use observing_handler::ObservingEventHandler;
pub use webhook_verifier::WebhookVerifier;
