//! Submission payload and normalizer
//!
//! The wire shape is:
//!
//! ```json
//! {
//!   "timestamp": "2025-01-01T00:00:00.000Z",
//!   "responses": { "q1": { "0": "1", "1": "No" } },
//!   "otherText": { "q1": "..." },
//!   "finalComment": "..."
//! }
//! ```
//!
//! Option indices are held as ordered label arrays and only become string
//! keys at serialization time.

use crate::{Questionnaire, RankAssignmentStore, RankLabel};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Labels of one question, in option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    pub question_id: String,
    pub labels: Vec<RankLabel>,
}

/// Responses of every question, in questionnaire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseTable {
    entries: Vec<QuestionResponse>,
}

impl ResponseTable {
    pub fn entries(&self) -> &[QuestionResponse] {
        &self.entries
    }

    pub fn get(&self, question_id: &str) -> Option<&[RankLabel]> {
        self.entries
            .iter()
            .find(|e| e.question_id == question_id)
            .map(|e| e.labels.as_slice())
    }
}

struct IndexedLabels<'a>(&'a [RankLabel]);

impl Serialize for IndexedLabels<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, label) in self.0.iter().enumerate() {
            map.serialize_entry(&index.to_string(), label)?;
        }
        map.end()
    }
}

impl Serialize for ResponseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.question_id, &IndexedLabels(&entry.labels))?;
        }
        map.end()
    }
}

/// Normalized survey submission, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// ISO-8601 UTC instant the payload was built
    pub timestamp: String,
    pub responses: ResponseTable,
    pub other_text: BTreeMap<String, String>,
    pub final_comment: String,
}

impl SubmissionPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Build the wire payload, stamped with the current time.
///
/// Free text must already be sanitized; it is passed through unchanged.
pub fn normalize(
    questionnaire: &Questionnaire,
    store: &RankAssignmentStore,
    other_text: BTreeMap<String, String>,
    final_comment: String,
) -> SubmissionPayload {
    normalize_at(questionnaire, store, other_text, final_comment, Utc::now())
}

/// Build the wire payload with an explicit timestamp.
///
/// Every option of every question gets a label; unset options become `No`.
pub fn normalize_at(
    questionnaire: &Questionnaire,
    store: &RankAssignmentStore,
    other_text: BTreeMap<String, String>,
    final_comment: String,
    at: DateTime<Utc>,
) -> SubmissionPayload {
    let entries = questionnaire
        .questions()
        .iter()
        .map(|question| QuestionResponse {
            question_id: question.id().to_string(),
            labels: (0..question.option_count())
                .map(|index| match store.label(question.id(), index) {
                    RankLabel::Unset => RankLabel::No,
                    label => label,
                })
                .collect(),
        })
        .collect();

    SubmissionPayload {
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        responses: ResponseTable { entries },
        other_text,
        final_comment,
    }
}
