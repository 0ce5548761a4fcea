//! Question value object

use crate::core::error::DomainError;
use serde::Serialize;

/// A ranking question (Value Object)
///
/// Each option of the question receives one [`RankLabel`](crate::RankLabel).
/// Questions are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: String,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    options: Vec<String>,
}

impl Question {
    /// Create a new question
    ///
    /// # Panics
    /// Panics if the id is blank or the option list is empty
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<String>) -> Self {
        match Self::try_new(id, text, options) {
            Ok(question) => question,
            Err(e) => panic!("{e}"),
        }
    }

    /// Try to create a new question
    pub fn try_new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question id cannot be empty".to_string(),
            ));
        }
        if options.is_empty() {
            return Err(DomainError::InvalidQuestion(format!(
                "question {id} has no options"
            )));
        }
        Ok(Self {
            id,
            text: text.into(),
            section: None,
            options,
        })
    }

    /// Attach a section label shown before this question
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Number of rankable options (N)
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}
