//! HTTP adapter for order and payment endpoints.
//!
//! - `POST /api/orders` - Create an order
//! - `GET /api/orders/:orderId` - Order status
//! - `DELETE /api/orders/:orderId` - Cancel an order
//! - `POST /api/orders/:orderId/confirm` - Capture an order
//! - `POST /api/payments/:captureId/refund` - Refund a capture
//! - `POST /api/payment-links` - Create a payment link

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrdersAppState;
pub use routes::orders_router;
