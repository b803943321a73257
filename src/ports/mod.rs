//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - Outbound PayPal REST operations
//! - `PaymentEventSink` - Receiver of verified, typed payment events
//! - `Clock` - Wall-clock time source for token expiry

mod clock;
mod event_sink;
mod payment_provider;

pub use clock::{Clock, SystemClock};
pub use event_sink::PaymentEventSink;
pub use payment_provider::PaymentProvider;
