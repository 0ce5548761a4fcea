//! Domain layer for survey-relay
//!
//! This crate contains the core survey logic: questions, rank assignment,
//! completeness validation, free-text hygiene and payload normalization.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Rank assignment
//!
//! Each option of a question holds a [`RankLabel`]: a rank `1`-`5`, `No`,
//! or unset. Within one question a numeric rank is held by at most one
//! option; [`RankAssignmentStore::assign`] moves it rather than duplicating.
//!
//! ## Submission pipeline (pure part)
//!
//! [`validate`] gates submission, [`sanitize`] cleans free text,
//! [`normalize`] builds the gap-free [`SubmissionPayload`]. Delivery itself
//! lives in the application layer.

pub mod core;
pub mod questionnaire;
pub mod ranking;
pub mod submission;
pub mod validation;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use questionnaire::{
    entities::{Questionnaire, SectionStart},
    question::Question,
};
pub use ranking::{
    label::RankLabel,
    store::{LabelChange, RankAssignmentStore},
};
pub use submission::{
    classifier::{ErrorCategory, categorize, describe},
    failure::{DeliveryFailure, FailureKind},
    payload::{QuestionResponse, ResponseTable, SubmissionPayload, normalize, normalize_at},
    sanitizer::{COMMENT_MAX_CHARS, TEXT_MAX_CHARS, sanitize, sanitize_all, sanitize_value},
};
pub use validation::{ValidationError, ValidationReport, validate};
