//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod orders;
pub mod webhooks;

pub use orders::{
    CancelOrderCommand, CancelOrderHandler, ConfirmOrderCommand, ConfirmOrderHandler,
    CreateOrderCommand, CreateOrderHandler, CreatePaymentLinkCommand, CreatePaymentLinkHandler,
    GetOrderStatusHandler, GetOrderStatusQuery, OrderFacade, RefundPaymentCommand,
    RefundPaymentHandler,
};
pub use webhooks::{EventDispatcher, ObservingEventHandler, WebhookOutcome, WebhookVerifier};
