//! HTTP adapters - REST API implementations.

pub mod app;
pub mod error;
pub mod health;
pub mod orders;
pub mod webhooks;

pub use app::{app_router, apply_layers, AppState};
pub use error::ApiError;
pub use health::ServiceInfo;
pub use orders::{orders_router, OrdersAppState};
pub use webhooks::{webhooks_router, WebhooksAppState};
