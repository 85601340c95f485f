//! Observability subsystem for furnistore
//!
//! - Structured JSON logging, one line per event
//! - A closed set of lifecycle and mutation events
//! - Per-store operation counters
//!
//! Observability never changes the outcome of a store operation.
//!
//! ```ignore
//! use furnistore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::FurnitureCreated, &[("id", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, StoreMetrics};

/// Log a lifecycle event at INFO, or FATAL for fatal events
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
