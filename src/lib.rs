//! PayPal Relay - HTTP relay between a merchant backend and PayPal
//!
//! Exposes order, refund and payment-link operations over a small JSON API,
//! and receives PayPal webhooks, verifying each delivery with PayPal before
//! routing it to typed event handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
