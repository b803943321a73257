//! HTTP handler for PayPal webhook deliveries.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::handlers::{EventDispatcher, WebhookOutcome};
use crate::domain::payment::TransmissionHeaders;

/// State shared by the webhook route.
#[derive(Clone)]
pub struct WebhooksAppState {
    pub dispatcher: Arc<EventDispatcher>,
}

impl WebhooksAppState {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }
}

/// Body returned to PayPal.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

impl From<WebhookOutcome> for WebhookResponse {
    fn from(outcome: WebhookOutcome) -> Self {
        Self {
            success: outcome.accepted,
            message: outcome.message,
        }
    }
}

/// Reads the `paypal-*` transmission headers. Absent or non-UTF-8 values
/// come through empty and fail verification downstream.
pub fn transmission_headers(headers: &HeaderMap) -> TransmissionHeaders {
    TransmissionHeaders::from_fn(|name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    })
}

/// POST <webhook path> - Receive a PayPal webhook
///
/// The raw body is passed through untouched and forwarded byte for byte to
/// PayPal's verification endpoint, which checks it against what was signed.
pub async fn receive_webhook(
    State(state): State<WebhooksAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let outcome = state
        .dispatcher
        .handle(&body, &transmission_headers(&headers))
        .await;

    let status = if outcome.accepted {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(WebhookResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn transmission_headers_are_read_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("PAYPAL-TRANSMISSION-ID", HeaderValue::from_static("tx-1"));
        headers.insert("paypal-transmission-time", HeaderValue::from_static("2024-01-01T00:00:00Z"));
        headers.insert("paypal-cert-url", HeaderValue::from_static("https://api.paypal.com/cert"));
        headers.insert("paypal-auth-algo", HeaderValue::from_static("SHA256withRSA"));
        headers.insert("paypal-transmission-sig", HeaderValue::from_static("sig"));

        let parsed = transmission_headers(&headers);
        assert_eq!(parsed.transmission_id, "tx-1");
        assert_eq!(parsed.auth_algo, "SHA256withRSA");
        assert!(parsed.is_complete());
    }

    #[test]
    fn missing_headers_come_through_empty() {
        let parsed = transmission_headers(&HeaderMap::new());
        assert!(parsed.transmission_id.is_empty());
        assert!(!parsed.is_complete());
    }

    #[test]
    fn outcome_maps_to_response() {
        let response = WebhookResponse::from(WebhookOutcome {
            accepted: false,
            message: "Invalid webhook signature".to_string(),
        });
        assert!(!response.success);
        assert_eq!(response.message, "Invalid webhook signature");
    }
}
