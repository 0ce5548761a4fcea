//! Port for structured delivery logging.
//!
//! Raw failure details (messages, attempt numbers, timings) go here for
//! later diagnosis. End users only ever see classified messages.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record (JSONL) of every delivery.

use serde_json::Value;

/// A structured delivery event for logging.
pub struct DeliveryLogEvent {
    /// Event type identifier (e.g., "attempt_failed", "delivered").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DeliveryLogEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging delivery events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures never disturb
/// the delivery loop.
pub trait DeliveryLogger: Send + Sync {
    fn log(&self, event: DeliveryLogEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDeliveryLogger;

impl DeliveryLogger for NoDeliveryLogger {
    fn log(&self, _event: DeliveryLogEvent) {}
}
