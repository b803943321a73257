//! Top-level router assembly.
//!
//! Merges the per-area routers, installs the 404 fallback, and wraps the
//! result in the tower-http middleware stack.

use std::time::Duration;

use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::error::{panic_response, NotFoundResponse};
use super::health::{health_router, ServiceInfo};
use super::orders::{orders_router, OrdersAppState};
use super::webhooks::{webhooks_router, WebhooksAppState};

/// Everything the routers need.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrdersAppState,
    pub webhooks: WebhooksAppState,
    pub service: ServiceInfo,
}

/// Build the application router without middleware.
pub fn app_router(state: AppState) -> Router {
    let webhook_path = state.service.webhook_path.clone();
    Router::new()
        .merge(health_router().with_state(state.service))
        .merge(orders_router().with_state(state.orders))
        .merge(webhooks_router(&webhook_path).with_state(state.webhooks))
        .fallback(not_found)
}

/// Fallback for unknown routes.
pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Not Found",
            message: format!("Endpoint {} {} does not exist", method, uri.path()),
        }),
    )
}

/// Wrap a router in the server middleware stack.
///
/// Panics inside handlers become 500 responses; the cause is only exposed in
/// development.
pub fn apply_layers(router: Router, server: &ServerConfig) -> Router {
    let diagnostic = server.is_diagnostic();
    let router = router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(
                server.request_timeout_secs,
            )))
            .layer(CatchPanicLayer::custom(move |panic| {
                panic_response(panic, diagnostic)
            })),
    );

    match cors_layer(&server.cors_origins_list()) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| o.parse().ok())
        .collect();
    if origins.is_empty() {
        return None;
    }
    tracing::info!(?origins, "CORS enabled");
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any),
    )
}
