//! Axum router configuration for order and payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_order, confirm_order, create_order, create_payment_link, get_order_status,
    refund_payment, OrdersAppState,
};

/// Create the order API router.
///
/// # Routes
/// - `POST /api/orders` - Create an order
/// - `GET /api/orders/:orderId` - Order status
/// - `DELETE /api/orders/:orderId` - Cancel (acknowledged, no provider call)
/// - `POST /api/orders/:orderId/confirm` - Capture an approved order
/// - `POST /api/payments/:captureId/refund` - Refund a capture
/// - `POST /api/payment-links` - Create a payment link
pub fn orders_router() -> Router<OrdersAppState> {
    Router::new()
        .route("/api/orders", post(create_order))
        .route(
            "/api/orders/:order_id",
            get(get_order_status).delete(cancel_order),
        )
        .route("/api/orders/:order_id/confirm", post(confirm_order))
        .route("/api/payments/:capture_id/refund", post(refund_payment))
        .route("/api/payment-links", post(create_payment_link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::paypal::MockPaymentProvider;
    use crate::application::handlers::OrderFacade;
    use crate::domain::foundation::{CaptureId, OrderId};
    use crate::domain::payment::{OrderResult, OrderStatus, PaymentError};

    fn app(mock: &MockPaymentProvider) -> Router {
        let facade = OrderFacade::new(Arc::new(mock.clone()));
        orders_router().with_state(OrdersAppState::new(facade))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Orders
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_order_returns_created() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request(
                "POST",
                "/api/orders",
                json!({"amount": 1000, "currency": "usd", "description": "Widget"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "CREATED");
        assert!(body["data"]["orderId"].as_str().unwrap().starts_with("ORDER-"));
        assert_eq!(mock.call_count("create_order"), 1);
    }

    #[tokio::test]
    async fn create_order_without_amount_is_rejected_before_provider() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request("POST", "/api/orders", json!({"currency": "USD"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_on_create_is_bad_request() {
        let mock = MockPaymentProvider::new();
        mock.set_method_error(
            "create_order",
            PaymentError::provider(422, "UNPROCESSABLE_ENTITY: currency not supported"),
        );

        let response = app(&mock)
            .oneshot(json_request(
                "POST",
                "/api/orders",
                json!({"amount": 1000, "currency": "USD"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "UNPROCESSABLE_ENTITY: currency not supported");
    }

    #[tokio::test]
    async fn confirm_order_returns_capture_id() {
        let mock = MockPaymentProvider::new();
        mock.add_order(OrderResult::new(
            OrderId::new("O1").unwrap(),
            OrderStatus::Approved,
        ));

        let response = app(&mock)
            .oneshot(json_request("POST", "/api/orders/O1/confirm", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["orderId"], "O1");
        assert_eq!(body["data"]["status"], "COMPLETED");
        assert!(body["data"]["captureId"].as_str().unwrap().starts_with("CAPTURE-"));
    }

    #[tokio::test]
    async fn confirm_unknown_order_is_bad_request() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request("POST", "/api/orders/MISSING/confirm", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn order_status_for_known_order() {
        let mock = MockPaymentProvider::new();
        let mut order = OrderResult::new(OrderId::new("O1").unwrap(), OrderStatus::Completed);
        order.capture_id = Some(CaptureId::new("C1").unwrap());
        mock.add_order(order);

        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .uri("/api/orders/O1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["captureId"], "C1");
    }

    #[tokio::test]
    async fn order_status_for_unknown_order_is_not_found() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .uri("/api/orders/NOPE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn cancel_order_makes_no_provider_call() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/orders/O1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert!(!body["message"].as_str().unwrap().is_empty());
        assert_eq!(mock.total_calls(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Payments
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn refund_returns_created() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request(
                "POST",
                "/api/payments/CAP1/refund",
                json!({"amount": 500, "currency": "USD", "description": "damaged"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert!(body["data"]["refundId"].as_str().unwrap().starts_with("REFUND-"));
        assert_eq!(body["data"]["status"], "COMPLETED");

        let requests = mock.refund_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].capture_id.as_str(), "CAP1");
        assert_eq!(requests[0].amount.minor_units(), 500);
    }

    #[tokio::test]
    async fn refund_with_zero_amount_is_rejected() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request(
                "POST",
                "/api/payments/CAP1/refund",
                json!({"amount": 0, "currency": "USD"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn payment_link_returns_created() {
        let mock = MockPaymentProvider::new();
        let response = app(&mock)
            .oneshot(json_request(
                "POST",
                "/api/payment-links",
                json!({"amount": 2500, "currency": "EUR", "referenceId": "INV-42"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert!(body["data"]["invoiceId"].as_str().unwrap().starts_with("INV2-"));
        assert_eq!(body["data"]["sendConfirmed"], true);
    }
}
