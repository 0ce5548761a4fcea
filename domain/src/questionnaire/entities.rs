//! Questionnaire entity and derived section layout

use super::question::Question;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a titled section begins in the question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStart {
    /// Index of the first question belonging to the section
    pub first_question_index: usize,
    /// Section title
    pub title: String,
}

/// The ordered, validated set of questions for a survey session.
///
/// Question ids are unique and every question has at least one option.
/// Only constructible through [`Questionnaire::new`], so the invariants hold
/// for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Build a questionnaire, rejecting empty lists and duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::EmptyQuestionnaire);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(DomainError::DuplicateQuestion(question.id().to_string()));
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Derive section boundaries in one pass.
    ///
    /// A new entry starts whenever a question carries a section label that
    /// differs from the section currently open. Questions without a label
    /// stay in the current section.
    pub fn sections(&self) -> Vec<SectionStart> {
        let mut sections: Vec<SectionStart> = Vec::new();

        for (index, question) in self.questions.iter().enumerate() {
            let Some(title) = question.section() else {
                continue;
            };
            let is_new = sections.last().is_none_or(|current| current.title != title);
            if is_new {
                sections.push(SectionStart {
                    first_question_index: index,
                    title: title.to_string(),
                });
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str) -> Question {
        Question::new(id, format!("Question {id}"), vec!["A".into(), "B".into()])
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            Questionnaire::new(vec![]),
            Err(DomainError::EmptyQuestionnaire)
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Questionnaire::new(vec![q("q1"), q("q1")]);
        assert_eq!(result, Err(DomainError::DuplicateQuestion("q1".to_string())));
    }

    #[test]
    fn test_sections_derived_once() {
        let questionnaire = Questionnaire::new(vec![
            q("q1").with_section("Work"),
            q("q2"),
            q("q3").with_section("Work"),
            q("q4").with_section("Home"),
            q("q5"),
        ])
        .unwrap();

        assert_eq!(
            questionnaire.sections(),
            vec![
                SectionStart {
                    first_question_index: 0,
                    title: "Work".to_string()
                },
                SectionStart {
                    first_question_index: 3,
                    title: "Home".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_sections_empty_without_labels() {
        let questionnaire = Questionnaire::new(vec![q("q1"), q("q2")]).unwrap();
        assert!(questionnaire.sections().is_empty());
    }
}
