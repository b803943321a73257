//! Adapters - Implementations of port interfaces.
//!
//! - `paypal` - PayPal REST client, token cache and a mock provider
//! - `events` - Sinks for handled webhook notifications
//! - `http` - Axum routes exposing the relay

pub mod events;
pub mod http;
pub mod paypal;

pub use events::{InMemoryEventSink, LoggingEventSink};
pub use paypal::{MockPaymentProvider, PayPalConfig, PayPalPaymentAdapter, TokenCache};
