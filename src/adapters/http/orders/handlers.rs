//! HTTP handlers for order and payment endpoints.
//!
//! These handlers connect Axum routes to the [`OrderFacade`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::OrderFacade;
use crate::domain::payment::PaymentError;

use super::super::error::ApiError;
use super::dto::{
    CreateOrderRequest, CreatePaymentLinkRequest, DataResponse, MessageResponse,
    OrderConfirmedView, OrderCreatedView, OrderStatusView, PaymentLinkView, RefundRequest,
    RefundView,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// State shared by the order routes.
#[derive(Clone)]
pub struct OrdersAppState {
    pub facade: OrderFacade,
    /// Expose upstream failure detail in error bodies.
    pub diagnostic: bool,
}

impl OrdersAppState {
    pub fn new(facade: OrderFacade) -> Self {
        Self {
            facade,
            diagnostic: false,
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: bool) -> Self {
        self.diagnostic = diagnostic;
        self
    }

    fn reject(&self, error: PaymentError) -> ApiError {
        ApiError::payment(error, self.diagnostic)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Order Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/orders - Create a checkout order
pub async fn create_order(
    State(state): State<OrdersAppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let result = state
        .facade
        .create_order(request.into())
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(order_id = %result.provider_id, status = %result.status.as_str(), "Order created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(OrderCreatedView::from(result))),
    ))
}

/// POST /api/orders/:orderId/confirm - Capture an approved order
pub async fn confirm_order(
    State(state): State<OrdersAppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .facade
        .confirm_order(order_id)
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(
        order_id = %result.provider_id,
        status = %result.status.as_str(),
        capture_id = ?result.capture_id.as_ref().map(|id| id.as_str()),
        "Order captured"
    );
    Ok(Json(DataResponse::ok(OrderConfirmedView::from(result))))
}

/// GET /api/orders/:orderId - Current order state
pub async fn get_order_status(
    State(state): State<OrdersAppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .facade
        .get_order_status(order_id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(DataResponse::ok(OrderStatusView::from(result))))
}

/// DELETE /api/orders/:orderId - Acknowledge a cancel request
pub async fn cancel_order(
    State(state): State<OrdersAppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .facade
        .cancel_order(order_id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(MessageResponse::from(outcome)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Payment Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/:captureId/refund - Refund a capture
pub async fn refund_payment(
    State(state): State<OrdersAppState>,
    Path(capture_id): Path<String>,
    payload: Result<Json<RefundRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let result = state
        .facade
        .refund_payment(request.into_command(capture_id))
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(refund_id = %result.refund_id, status = %result.status.as_str(), "Refund created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(RefundView::from(result))),
    ))
}

/// POST /api/payment-links - Create a shareable payment link
pub async fn create_payment_link(
    State(state): State<OrdersAppState>,
    payload: Result<Json<CreatePaymentLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let link = state
        .facade
        .create_payment_link(request.into())
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(
        invoice_id = %link.invoice_id,
        send_confirmed = link.send_confirmed,
        "Payment link created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(PaymentLinkView::from(link))),
    ))
}
