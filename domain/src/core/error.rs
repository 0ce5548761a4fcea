//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Questionnaire has no questions")]
    EmptyQuestionnaire,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Option index {index} out of range for question {question_id} ({option_count} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        option_count: usize,
    },

    #[error("Invalid rank label: {0:?}")]
    InvalidRankLabel(String),
}

impl DomainError {
    /// Check if this error was caused by an answer referencing something
    /// the questionnaire does not define.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownQuestion(_) | DomainError::OptionOutOfRange { .. }
        )
    }
}
