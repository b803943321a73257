//! Payment domain module.
//!
//! Provider-agnostic vocabulary for orders, refunds, payment links, and
//! asynchronous payment events.
//!
//! # Module Structure
//!
//! - `order` - Order request/result types and status
//! - `refund` - Refund request/result types
//! - `payment_link` - Invoice-backed payment links
//! - `event` - Webhook envelope and typed payment events
//! - `event_registry` - Event kind to handler lookup table
//! - `errors` - `PaymentError`
//! - `webhook_errors` - `WebhookError`

mod errors;
mod event;
mod event_registry;
mod order;
mod payment_link;
mod refund;
mod webhook_errors;

pub use errors::PaymentError;
pub use event::{
    CaptureResource, OrderResource, PaymentEvent, PaymentEventKind, PaymentNotification,
    ProviderAmount, PurchaseUnitResource, RefundResource, SubscriptionResource,
    TransmissionHeaders, WebhookEnvelope, AUTH_ALGO_HEADER, CERT_URL_HEADER,
    TRANSMISSION_ID_HEADER, TRANSMISSION_SIG_HEADER, TRANSMISSION_TIME_HEADER,
};
pub use event_registry::{DispatchOutcome, HandlerRegistry, PaymentEventHandler};
pub use order::{CancelOutcome, Link, OrderRequest, OrderResult, OrderStatus, Payer};
pub use payment_link::{PaymentLink, PaymentLinkRequest};
pub use refund::{RefundRequest, RefundResult, RefundStatus};
pub use webhook_errors::WebhookError;
