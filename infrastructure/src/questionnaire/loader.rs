//! Questionnaire TOML loader
//!
//! ```toml
//! [[question]]
//! id = "q1"
//! text = "Which tools do you use?"
//! section = "Tooling"
//! options = ["Editor", "Debugger", "Profiler"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_domain::{DomainError, Question, Questionnaire};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a questionnaire file
#[derive(Error, Debug)]
pub enum QuestionnaireLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse questionnaire: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One `[[question]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileQuestion {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

impl FileQuestion {
    fn into_question(self) -> Result<Question, DomainError> {
        let question = Question::try_new(self.id, self.text, self.options)?;
        Ok(match self.section {
            Some(section) if !section.trim().is_empty() => question.with_section(section),
            _ => question,
        })
    }
}

/// Raw questionnaire document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileQuestionnaire {
    #[serde(default, rename = "question")]
    pub questions: Vec<FileQuestion>,
}

impl FileQuestionnaire {
    pub fn parse(source: &str) -> Result<Self, QuestionnaireLoadError> {
        Ok(toml::from_str(source)?)
    }

    pub fn read(path: &Path) -> Result<Self, QuestionnaireLoadError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| QuestionnaireLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Read questionnaire from {}", path.display());
        Self::parse(&source)
    }

    /// Convert into a validated [`Questionnaire`].
    pub fn into_questionnaire(self) -> Result<Questionnaire, QuestionnaireLoadError> {
        let questions = self
            .questions
            .into_iter()
            .map(FileQuestion::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Questionnaire::new(questions)?)
    }

    /// Read and validate in one step.
    pub fn load(path: &Path) -> Result<Questionnaire, QuestionnaireLoadError> {
        Self::read(path)?.into_questionnaire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[question]]
id = "q1"
text = "Which tools do you use?"
section = "Tooling"
options = ["Editor", "Debugger"]

[[question]]
id = "q2"
text = "Which do you trust?"
section = "Tooling"
options = ["Tests", "Types", "Reviews"]

[[question]]
id = "q3"
text = "Anything else?"
section = "Wrap-up"
options = ["Yes"]
"#;

    #[test]
    fn test_parse_sample() {
        let questionnaire = FileQuestionnaire::parse(SAMPLE)
            .unwrap()
            .into_questionnaire()
            .unwrap();

        assert_eq!(questionnaire.len(), 3);
        assert_eq!(questionnaire.questions()[1].option_count(), 3);

        let sections = questionnaire.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].first_question_index, 0);
        assert_eq!(sections[1].first_question_index, 2);
        assert_eq!(sections[1].title, "Wrap-up");
    }

    #[test]
    fn test_rejects_question_without_options() {
        let source = "[[question]]\nid = \"q1\"\ntext = \"Empty\"\n";
        let err = FileQuestionnaire::parse(source)
            .unwrap()
            .into_questionnaire()
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionnaireLoadError::Domain(DomainError::InvalidQuestion(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let source = r#"
[[question]]
id = "q1"
options = ["A"]

[[question]]
id = "q1"
options = ["B"]
"#;
        let err = FileQuestionnaire::parse(source)
            .unwrap()
            .into_questionnaire()
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionnaireLoadError::Domain(DomainError::DuplicateQuestion(id)) if id == "q1"
        ));
    }

    #[test]
    fn test_rejects_empty_document() {
        let err = FileQuestionnaire::parse("")
            .unwrap()
            .into_questionnaire()
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionnaireLoadError::Domain(DomainError::EmptyQuestionnaire)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileQuestionnaire::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, QuestionnaireLoadError::Io { .. }));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            FileQuestionnaire::parse("[[question]\n"),
            Err(QuestionnaireLoadError::Parse(_))
        ));
    }
}
