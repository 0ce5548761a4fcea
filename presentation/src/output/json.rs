//! JSON output formatting
//!
//! Every result is a single JSON document with a `status` field so scripts
//! can branch without parsing text.

use crate::output::formatter::OutputFormatter;
use serde_json::{Value, json};
use survey_application::{SubmissionError, SubmitSurveyOutput};
use survey_domain::{Questionnaire, SubmissionPayload, ValidationReport};

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outline(&self, questionnaire: &Questionnaire) -> String {
        Self::render(json!({
            "status": "outline",
            "sections": questionnaire.sections(),
            "questions": questionnaire.questions(),
        }))
    }

    fn format_validation(&self, report: &ValidationReport) -> String {
        Self::render(json!({
            "status": "incomplete",
            "errors": report.errors,
            "focus": report.focus_target(),
        }))
    }

    fn format_payload(&self, payload: &SubmissionPayload) -> String {
        Self::render(json!({
            "status": "dry_run",
            "payload": payload,
        }))
    }

    fn format_delivered(&self, output: &SubmitSurveyOutput) -> String {
        Self::render(json!({
            "status": "delivered",
            "attempts": output.receipt.attempts,
            "elapsed_ms": output.receipt.elapsed.as_millis() as u64,
            "payload": output.payload,
        }))
    }

    fn format_failure(&self, error: &SubmissionError) -> String {
        if let Some(report) = error.validation_report() {
            return self.format_validation(report);
        }
        Self::render(json!({
            "status": "failed",
            "message": error.user_message(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_domain::{Question, RankAssignmentStore, validate};

    #[test]
    fn test_validation_document() {
        let questionnaire =
            Questionnaire::new(vec![Question::new("q1", "Pick", vec!["A".into()])]).unwrap();
        let report = validate(&questionnaire, &RankAssignmentStore::new(&questionnaire), "ok");

        let value: Value =
            serde_json::from_str(&JsonFormatter.format_validation(&report)).unwrap();
        assert_eq!(value["status"], "incomplete");
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
        assert_eq!(value["focus"]["type"], "question");
        assert_eq!(value["focus"]["question_id"], "q1");
    }

    #[test]
    fn test_failure_document_is_classified() {
        let value: Value =
            serde_json::from_str(&JsonFormatter.format_failure(&SubmissionError::Interrupted))
                .unwrap();
        assert_eq!(value["status"], "failed");
        assert!(!value["message"].as_str().unwrap().is_empty());
    }
}
