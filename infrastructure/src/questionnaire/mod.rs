//! File loaders for questionnaires and answer sheets
//!
//! Both are TOML documents. The questionnaire defines what is asked; the
//! answer sheet replays a respondent's marks against it.

mod answers;
mod loader;

pub use answers::{AnswerSheetError, FileAnswerSheet, FileMark};
pub use loader::{FileQuestion, FileQuestionnaire, QuestionnaireLoadError};
