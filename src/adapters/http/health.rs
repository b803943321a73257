//! Service index and health endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::config::Environment;

/// Static facts about the running service.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub environment: Environment,
    pub webhook_path: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: EndpointMap,
}

#[derive(Debug, Serialize)]
pub struct EndpointMap {
    pub health: &'static str,
    pub webhook: String,
    pub orders: OrderEndpoints,
    pub payments: PaymentEndpoints,
}

#[derive(Debug, Serialize)]
pub struct OrderEndpoints {
    pub create: &'static str,
    pub status: &'static str,
    pub confirm: &'static str,
    pub cancel: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEndpoints {
    pub refund: &'static str,
    pub payment_link: &'static str,
}

/// GET / - Service index
pub async fn index(State(info): State<ServiceInfo>) -> impl IntoResponse {
    Json(IndexResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints: EndpointMap {
            health: "/api/health",
            webhook: info.webhook_path,
            orders: OrderEndpoints {
                create: "POST /api/orders",
                status: "GET /api/orders/:orderId",
                confirm: "POST /api/orders/:orderId/confirm",
                cancel: "DELETE /api/orders/:orderId",
            },
            payments: PaymentEndpoints {
                refund: "POST /api/payments/:captureId/refund",
                payment_link: "POST /api/payment-links",
            },
        },
    })
}

/// GET /api/health - Liveness probe
pub async fn health(State(info): State<ServiceInfo>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "online",
        timestamp: Utc::now().to_rfc3339(),
        environment: info.environment.as_str(),
    })
}

pub fn health_router() -> Router<ServiceInfo> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
}
