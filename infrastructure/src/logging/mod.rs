//! Structured delivery logging.
//!
//! Provides [`JsonlDeliveryLogger`], a JSONL file writer that implements
//! the [`DeliveryLogger`](survey_application::DeliveryLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlDeliveryLogger;
