//! Console output formatting for survey results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use survey_application::{INCOMPLETE_MESSAGE, SubmissionError, SubmitSurveyOutput};
use survey_domain::{Questionnaire, SubmissionPayload, ValidationError, ValidationReport};

/// Formats results as colored text for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Questions grouped under their derived sections
    pub fn format_outline(questionnaire: &Questionnaire) -> String {
        let mut output = Self::header("Questionnaire Outline");
        output.push('\n');

        let sections = questionnaire.sections();
        for (index, question) in questionnaire.questions().iter().enumerate() {
            if let Some(section) = sections.iter().find(|s| s.first_question_index == index) {
                output.push_str(&Self::section_header(&section.title));
            }
            output.push_str(&format!(
                "{} {}\n",
                format!("{:>3}.", index + 1).dimmed(),
                question.text()
            ));
            for (option_index, option) in question.options().iter().enumerate() {
                output.push_str(&format!("       [{}] {}\n", option_index, option));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Unanswered questions first, then the comment; the focus target is
    /// marked with an arrow.
    pub fn format_validation(report: &ValidationReport) -> String {
        let mut output = format!("{}\n\n", INCOMPLETE_MESSAGE.yellow().bold());
        let focus = report.focus_target();

        for error in &report.errors {
            let line = match error {
                ValidationError::Question { question_id, .. } => {
                    format!("{} ({})", error, question_id)
                }
                ValidationError::FinalComment => error.to_string(),
            };
            if Some(error) == focus {
                output.push_str(&format!("{} {}\n", "->".red().bold(), line.red().bold()));
            } else {
                output.push_str(&format!("   {}\n", line));
            }
        }

        output
    }

    pub fn format_payload(payload: &SubmissionPayload) -> String {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_delivered(output: &SubmitSurveyOutput) -> String {
        let attempts = output.receipt.attempts;
        format!(
            "{} Survey submitted {}\n",
            "v".green().bold(),
            format!(
                "({} attempt{}, {} ms)",
                attempts,
                if attempts == 1 { "" } else { "s" },
                output.receipt.elapsed.as_millis()
            )
            .dimmed()
        )
    }

    pub fn format_failure(error: &SubmissionError) -> String {
        if let Some(report) = error.validation_report() {
            return Self::format_validation(report);
        }
        format!("{} {}\n", "x".red().bold(), error.user_message())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outline(&self, questionnaire: &Questionnaire) -> String {
        Self::format_outline(questionnaire)
    }

    fn format_validation(&self, report: &ValidationReport) -> String {
        Self::format_validation(report)
    }

    fn format_payload(&self, payload: &SubmissionPayload) -> String {
        Self::format_payload(payload)
    }

    fn format_delivered(&self, output: &SubmitSurveyOutput) -> String {
        Self::format_delivered(output)
    }

    fn format_failure(&self, error: &SubmissionError) -> String {
        Self::format_failure(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_application::DeliveryError;
    use survey_domain::submission::classifier::CONFIGURATION_MESSAGE;
    use survey_domain::{Question, RankAssignmentStore, validate};

    fn questionnaire() -> Questionnaire {
        Questionnaire::new(vec![
            Question::new("q1", "Favourite editor", vec!["Vim".into(), "Emacs".into()])
                .with_section("Tools"),
            Question::new("q2", "Favourite shell", vec!["bash".into()]).with_section("Tools"),
            Question::new("q3", "Team size", vec!["1-5".into()]).with_section("Team"),
        ])
        .unwrap()
    }

    #[test]
    fn test_outline_lists_each_section_once() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_outline(&questionnaire());

        assert_eq!(output.matches("Tools").count(), 1);
        assert_eq!(output.matches("Team\n").count(), 1);
        assert!(output.contains("[1] Emacs"));
        assert!(output.find("Favourite shell") < output.find("Team size"));
    }

    #[test]
    fn test_validation_marks_focus_target() {
        colored::control::set_override(false);
        let questionnaire = questionnaire();
        let store = RankAssignmentStore::new(&questionnaire);
        let report = validate(&questionnaire, &store, "");

        let output = ConsoleFormatter::format_validation(&report);
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("-> Question 1"));
        assert!(lines[1].starts_with("   Question 2"));
        assert_eq!(lines[3], "   Final comment is required");
    }

    #[test]
    fn test_failure_uses_classified_message() {
        colored::control::set_override(false);
        let error = SubmissionError::Delivery(DeliveryError::NotConfigured);
        let output = ConsoleFormatter::format_failure(&error);
        assert_eq!(output, format!("x {}\n", CONFIGURATION_MESSAGE));
    }
}
