//! Output formatter trait

use survey_application::{SubmissionError, SubmitSurveyOutput};
use survey_domain::{Questionnaire, SubmissionPayload, ValidationReport};

/// Trait for rendering command results
pub trait OutputFormatter {
    /// Section outline of a questionnaire
    fn format_outline(&self, questionnaire: &Questionnaire) -> String;

    /// Incompleteness findings that blocked a submission
    fn format_validation(&self, report: &ValidationReport) -> String;

    /// Normalized payload (dry run)
    fn format_payload(&self, payload: &SubmissionPayload) -> String;

    /// Successful delivery
    fn format_delivered(&self, output: &SubmitSurveyOutput) -> String;

    /// Any other submission failure
    fn format_failure(&self, error: &SubmissionError) -> String;
}
