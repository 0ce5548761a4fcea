//! Rank assignment store
//!
//! Holds the label of every option of every question and enforces the
//! exclusivity rule: within one question each numeric rank is held by at
//! most one option. `No` is exempt and may appear on any number of options.
//!
//! The store is an immutable value. [`RankAssignmentStore::assign`] returns
//! a new store and leaves the receiver untouched, so callers can compare the
//! previous and next state with [`RankAssignmentStore::changes_from`].

use super::label::RankLabel;
use crate::Questionnaire;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One option whose label differs between two store states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelChange {
    pub question_id: String,
    pub option_index: usize,
    pub from: RankLabel,
    pub to: RankLabel,
}

/// Per-question rank assignments (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankAssignmentStore {
    labels: BTreeMap<String, Vec<RankLabel>>,
}

impl RankAssignmentStore {
    /// Create an empty store sized to the questionnaire: every option unset.
    pub fn new(questionnaire: &Questionnaire) -> Self {
        let labels = questionnaire
            .questions()
            .iter()
            .map(|q| (q.id().to_string(), vec![RankLabel::Unset; q.option_count()]))
            .collect();
        Self { labels }
    }

    /// Assign `label` to one option and return the resulting store.
    ///
    /// - `Unset` clears the option.
    /// - `No` is set directly; other options keep their marks.
    /// - A numeric rank is first cleared from whichever other option holds
    ///   it, then set on the target option.
    ///
    /// # Panics
    /// Panics if `question_id` is unknown or `option_index` is out of range.
    pub fn assign(&self, question_id: &str, option_index: usize, label: RankLabel) -> Self {
        match self.try_assign(question_id, option_index, label) {
            Ok(next) => next,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible variant of [`assign`](Self::assign) for untrusted input.
    pub fn try_assign(
        &self,
        question_id: &str,
        option_index: usize,
        label: RankLabel,
    ) -> Result<Self, DomainError> {
        let current = self
            .labels
            .get(question_id)
            .ok_or_else(|| DomainError::UnknownQuestion(question_id.to_string()))?;

        if option_index >= current.len() {
            return Err(DomainError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index: option_index,
                option_count: current.len(),
            });
        }

        let mut updated = current.clone();
        if label.is_numeric() {
            for (index, held) in updated.iter_mut().enumerate() {
                if index != option_index && *held == label {
                    *held = RankLabel::Unset;
                }
            }
        }
        updated[option_index] = label;

        let mut next = self.clone();
        next.labels.insert(question_id.to_string(), updated);
        Ok(next)
    }

    /// Label of one option. Unknown entries read as `Unset`.
    pub fn label(&self, question_id: &str, option_index: usize) -> RankLabel {
        self.labels
            .get(question_id)
            .and_then(|labels| labels.get(option_index))
            .copied()
            .unwrap_or_default()
    }

    /// All labels of a question in option order (empty if unknown).
    pub fn labels(&self, question_id: &str) -> &[RankLabel] {
        self.labels
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A question counts as answered when any option carries a mark,
    /// including a lone `No`.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.labels(question_id).iter().any(RankLabel::is_set)
    }

    /// Options whose label differs from `previous`, in question-id then
    /// option order.
    pub fn changes_from(&self, previous: &RankAssignmentStore) -> Vec<LabelChange> {
        let mut changes = Vec::new();

        for (question_id, labels) in &self.labels {
            for (option_index, to) in labels.iter().enumerate() {
                let from = previous.label(question_id, option_index);
                if from != *to {
                    changes.push(LabelChange {
                        question_id: question_id.clone(),
                        option_index,
                        from,
                        to: *to,
                    });
                }
            }
        }

        changes
    }
}
