//! PayPal payment provider adapter.
//!
//! Implements the `PaymentProvider` port for the PayPal REST API, including:
//! - OAuth2 client-credentials token caching
//! - Checkout orders (create, capture, lookup)
//! - Capture refunds
//! - Invoice-backed payment links
//! - Webhook signature verification via PayPal's verification endpoint
//!
//! # Configuration
//!
//! Required environment variables:
//! - `PAYPAL_RELAY__PAYPAL__CLIENT_ID`: REST app client id
//! - `PAYPAL_RELAY__PAYPAL__CLIENT_SECRET`: REST app secret
//! - `PAYPAL_RELAY__PAYPAL__WEBHOOK_ID`: id of the registered webhook

mod mock_payment_provider;
mod oauth;
mod paypal_adapter;
mod token_cache;
mod wire_types;

pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use oauth::PayPalOAuthClient;
pub use paypal_adapter::{PayPalConfig, PayPalPaymentAdapter, LIVE_BASE_URL, SANDBOX_BASE_URL};
pub use token_cache::{CredentialExchange, IssuedToken, TokenCache, SAFETY_MARGIN_MS};
