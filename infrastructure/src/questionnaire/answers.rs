//! Answer sheet TOML loader
//!
//! ```toml
//! comment = "Thanks for asking"
//!
//! [other]
//! q2 = "Pair programming"
//!
//! [[mark]]
//! question = "q1"
//! option = 0
//! rank = "1"
//! ```
//!
//! Marks are replayed in file order through
//! [`RankAssignmentStore::try_assign`], so a later mark moving rank `1`
//! within a question clears the earlier holder just as a live click would.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use survey_application::SubmitSurveyInput;
use survey_domain::{DomainError, Questionnaire, RankAssignmentStore, RankLabel};
use thiserror::Error;

/// Errors raised while reading or replaying an answer sheet
#[derive(Error, Debug)]
pub enum AnswerSheetError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse answer sheet: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Mark #{position}: {source}")]
    Mark {
        position: usize,
        #[source]
        source: DomainError,
    },
}

impl AnswerSheetError {
    /// A mark names a question or option the questionnaire does not have,
    /// usually because the sheet was written for another questionnaire.
    pub fn is_questionnaire_mismatch(&self) -> bool {
        matches!(self, AnswerSheetError::Mark { source, .. } if source.is_reference_error())
    }
}

/// One `[[mark]]` entry; `option` is the zero-based option index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMark {
    pub question: String,
    pub option: usize,
    #[serde(default)]
    pub rank: String,
}

/// Raw answer sheet document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnswerSheet {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub other: BTreeMap<String, String>,
    #[serde(default, rename = "mark")]
    pub marks: Vec<FileMark>,
}

impl FileAnswerSheet {
    pub fn parse(source: &str) -> Result<Self, AnswerSheetError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, AnswerSheetError> {
        let source = std::fs::read_to_string(path).map_err(|source| AnswerSheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Replay every mark against a fresh store.
    pub fn replay(
        &self,
        questionnaire: &Questionnaire,
    ) -> Result<RankAssignmentStore, AnswerSheetError> {
        self.marks
            .iter()
            .enumerate()
            .try_fold(RankAssignmentStore::new(questionnaire), |store, (i, mark)| {
                let position = i + 1;
                let label: RankLabel = mark
                    .rank
                    .parse()
                    .map_err(|source| AnswerSheetError::Mark { position, source })?;
                store
                    .try_assign(&mark.question, mark.option, label)
                    .map_err(|source| AnswerSheetError::Mark { position, source })
            })
    }

    /// Build the submission input. A command-line comment, when given,
    /// replaces the sheet's comment.
    pub fn into_input(
        self,
        questionnaire: &Questionnaire,
        comment_override: Option<String>,
    ) -> Result<SubmitSurveyInput, AnswerSheetError> {
        let store = self.replay(questionnaire)?;
        let comment = comment_override.unwrap_or(self.comment);
        Ok(self
            .other
            .into_iter()
            .fold(SubmitSurveyInput::new(store, comment), |input, (id, text)| {
                input.with_other_text(id, text)
            }))
    }
}
