//! Order handlers.
//!
//! Commands and queries for checkout orders, refunds and payment links.

mod cancel_order;
mod confirm_order;
mod create_order;
mod create_payment_link;
mod facade;
mod get_order_status;
mod refund_payment;
mod validation;

pub use cancel_order::{CancelOrderCommand, CancelOrderHandler};
pub use confirm_order::{ConfirmOrderCommand, ConfirmOrderHandler};
pub use create_order::{CreateOrderCommand, CreateOrderHandler};
pub use create_payment_link::{CreatePaymentLinkCommand, CreatePaymentLinkHandler};
pub use facade::OrderFacade;
pub use get_order_status::{GetOrderStatusHandler, GetOrderStatusQuery};
pub use refund_payment::{RefundPaymentCommand, RefundPaymentHandler};
