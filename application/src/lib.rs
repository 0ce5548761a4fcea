//! Application layer for survey-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeliveryPolicy;
pub use ports::{
    delivery_logger::{DeliveryLogEvent, DeliveryLogger, NoDeliveryLogger},
    delivery_progress::{DeliveryProgress, NoDeliveryProgress},
    submission_transport::{SubmissionTransport, TransportError},
};
pub use use_cases::deliver_payload::{DeliveryError, DeliveryPipeline, DeliveryReceipt};
pub use use_cases::delivery_stream::{ChannelProgress, DeliveryEvent, DeliveryHandle};
pub use use_cases::gate::{SubmissionGate, SubmissionPermit};
pub use use_cases::submit_survey::{
    INCOMPLETE_MESSAGE, SubmissionError, SubmitSurveyInput, SubmitSurveyOutput,
    SubmitSurveyUseCase,
};
