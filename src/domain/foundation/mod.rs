//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the payment relay.

mod errors;
mod ids;
mod money;

pub use errors::ValidationError;
pub use ids::{CaptureId, OrderId};
pub use money::{CurrencyCode, Money};
