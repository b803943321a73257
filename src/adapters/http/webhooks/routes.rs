//! Axum router configuration for the webhook receiver.

use axum::{routing::post, Router};

use super::handlers::{receive_webhook, WebhooksAppState};

/// Create the webhook router, mounted at the configured path.
pub fn webhooks_router(path: &str) -> Router<WebhooksAppState> {
    Router::new().route(path, post(receive_webhook))
}
