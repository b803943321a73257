//! Domain layer containing payment types and event routing.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (money, IDs, validation errors)
//! - `payment` - Orders, refunds, payment links, webhook events and errors

pub mod foundation;
pub mod payment;
