//! HTTP adapter for the PayPal webhook receiver.

pub mod handlers;
pub mod routes;

pub use handlers::WebhooksAppState;
pub use routes::webhooks_router;
