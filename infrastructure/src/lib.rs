//! Infrastructure layer for survey-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and input file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod questionnaire;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileDeliveryConfig, FileOutputConfig,
    FileOutputFormat, Severity,
};
pub use http::HttpSubmissionTransport;
pub use logging::JsonlDeliveryLogger;
pub use questionnaire::{
    AnswerSheetError, FileAnswerSheet, FileMark, FileQuestion, FileQuestionnaire,
    QuestionnaireLoadError,
};
