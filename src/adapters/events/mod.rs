//! Payment event sink adapters.
//!
//! - `LoggingEventSink` - Default sink, writes one structured log line per event
//! - `InMemoryEventSink` - Recording sink for tests

mod in_memory;
mod logging_sink;

pub use in_memory::InMemoryEventSink;
pub use logging_sink::LoggingEventSink;
