//! Completeness validation
//!
//! [`validate`] checks that every question carries at least one mark and
//! that the final comment is not blank. Failures are data, not errors: the
//! caller renders them and uses [`ValidationReport::focus_target`] to decide
//! where to move the cursor.

use crate::core::string::take_chars;
use crate::{Questionnaire, RankAssignmentStore};
use serde::{Deserialize, Serialize};

/// Number of characters of question text kept in an error preview
pub const PREVIEW_CHARS: usize = 50;

/// A single incompleteness finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ValidationError {
    /// No option of the question carries a mark
    Question {
        question_id: String,
        index: usize,
        preview: String,
    },
    /// The final comment is empty or whitespace
    FinalComment,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Question { index, preview, .. } => {
                write!(f, "Question {} is unanswered: {}", index + 1, preview)
            }
            ValidationError::FinalComment => write!(f, "Final comment is required"),
        }
    }
}

/// Outcome of [`validate`]: question errors in question order, then the
/// final-comment error if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error that should receive focus: the first unanswered question,
    /// otherwise the final comment.
    pub fn focus_target(&self) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| matches!(e, ValidationError::Question { .. }))
            .or_else(|| self.errors.first())
    }
}

/// Check completeness of the current answers.
///
/// A question is answered when any option carries a non-empty label. A
/// single `No` with every other option unset is enough.
pub fn validate(
    questionnaire: &Questionnaire,
    store: &RankAssignmentStore,
    final_comment: &str,
) -> ValidationReport {
    let mut errors: Vec<ValidationError> = questionnaire
        .questions()
        .iter()
        .enumerate()
        .filter(|(_, question)| !store.is_answered(question.id()))
        .map(|(index, question)| ValidationError::Question {
            question_id: question.id().to_string(),
            index,
            preview: take_chars(question.text(), PREVIEW_CHARS).to_string(),
        })
        .collect();

    if final_comment.trim().is_empty() {
        errors.push(ValidationError::FinalComment);
    }

    ValidationReport { errors }
}
