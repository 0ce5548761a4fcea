//! Submit Survey use case
//!
//! Orchestrates the full submission flow:
//!
//! 1. Claim the single-flight gate (reject if busy)
//! 2. Validate completeness
//! 3. Sanitize free text
//! 4. Normalize into the wire payload
//! 5. Deliver through [`DeliveryPipeline`]

use super::deliver_payload::{DeliveryError, DeliveryPipeline, DeliveryReceipt};
use super::delivery_stream::{ChannelProgress, DeliveryEvent, DeliveryHandle};
use super::gate::{SubmissionGate, SubmissionPermit};
use crate::ports::delivery_progress::{DeliveryProgress, NoDeliveryProgress};
use crate::ports::submission_transport::SubmissionTransport;
use std::collections::BTreeMap;
use std::sync::Arc;
use survey_domain::{
    COMMENT_MAX_CHARS, Questionnaire, RankAssignmentStore, SubmissionPayload, TEXT_MAX_CHARS,
    ValidationReport, describe, normalize, sanitize, sanitize_all, validate,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Message shown when validation blocks a submission
pub const INCOMPLETE_MESSAGE: &str =
    "Please answer every question and leave a final comment before submitting.";

/// Errors that can occur during submission
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("Survey is incomplete ({} issues)", .0.errors.len())]
    Incomplete(ValidationReport),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("Submission task ended before reporting a result")]
    Interrupted,
}

impl SubmissionError {
    /// Short message suitable for the end user
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Incomplete(_) => INCOMPLETE_MESSAGE.to_string(),
            SubmissionError::Delivery(e) => e.category().user_message().to_string(),
            other => describe(other),
        }
    }

    /// The validation report, if validation blocked the submission
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            SubmissionError::Incomplete(report) => Some(report),
            _ => None,
        }
    }
}

/// Input for the SubmitSurvey use case
#[derive(Debug, Clone)]
pub struct SubmitSurveyInput {
    /// Current rank assignments
    pub store: RankAssignmentStore,
    /// Raw "other" free text keyed by question id
    pub other_text: BTreeMap<String, String>,
    /// Raw final comment
    pub final_comment: String,
}

impl SubmitSurveyInput {
    pub fn new(store: RankAssignmentStore, final_comment: impl Into<String>) -> Self {
        Self {
            store,
            other_text: BTreeMap::new(),
            final_comment: final_comment.into(),
        }
    }

    pub fn with_other_text(mut self, question_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.other_text.insert(question_id.into(), text.into());
        self
    }
}

/// Result of a delivered submission
#[derive(Debug, Clone)]
pub struct SubmitSurveyOutput {
    pub payload: SubmissionPayload,
    pub receipt: DeliveryReceipt,
}

/// Use case for submitting a completed survey
pub struct SubmitSurveyUseCase<T: SubmissionTransport + 'static> {
    questionnaire: Arc<Questionnaire>,
    pipeline: DeliveryPipeline<T>,
    endpoint: Option<String>,
    gate: SubmissionGate,
}

impl<T: SubmissionTransport + 'static> SubmitSurveyUseCase<T> {
    pub fn new(
        questionnaire: Arc<Questionnaire>,
        pipeline: DeliveryPipeline<T>,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            questionnaire,
            pipeline,
            endpoint,
            gate: SubmissionGate::new(),
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Caller-visible busy flag
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Validate, sanitize and normalize without sending anything.
    pub fn prepare(&self, input: &SubmitSurveyInput) -> Result<SubmissionPayload, SubmissionError> {
        let report = validate(&self.questionnaire, &input.store, &input.final_comment);
        if !report.is_valid() {
            info!("Submission blocked: {} validation issues", report.errors.len());
            return Err(SubmissionError::Incomplete(report));
        }

        let other_text = sanitize_all(&input.other_text, TEXT_MAX_CHARS);
        let final_comment = sanitize(Some(&input.final_comment), COMMENT_MAX_CHARS);

        Ok(normalize(
            &self.questionnaire,
            &input.store,
            other_text,
            final_comment,
        ))
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: SubmitSurveyInput,
    ) -> Result<SubmitSurveyOutput, SubmissionError> {
        self.execute_with_progress(input, &NoDeliveryProgress).await
    }

    /// Execute the use case with attempt callbacks
    pub async fn execute_with_progress(
        &self,
        input: SubmitSurveyInput,
        progress: &dyn DeliveryProgress,
    ) -> Result<SubmitSurveyOutput, SubmissionError> {
        let permit = self.claim()?;
        self.run(permit, input, progress).await
    }

    /// Run the submission in the background and return its event sequence.
    ///
    /// The gate is claimed before this returns, so a concurrent call fails
    /// with [`SubmissionError::Busy`] immediately.
    pub fn start(self: &Arc<Self>, input: SubmitSurveyInput) -> Result<DeliveryHandle, SubmissionError> {
        let permit = self.claim()?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let this = Arc::clone(self);

        tokio::spawn(async move {
            let progress = ChannelProgress::new(sender.clone());
            let result = this.run(permit, input, &progress).await;
            let _ = sender.send(DeliveryEvent::Finished(result));
        });

        Ok(DeliveryHandle::new(receiver))
    }

    fn claim(&self) -> Result<SubmissionPermit, SubmissionError> {
        self.gate.try_acquire().ok_or_else(|| {
            warn!("Rejected submission: another submission is in flight");
            SubmissionError::Busy
        })
    }

    async fn run(
        &self,
        _permit: SubmissionPermit,
        input: SubmitSurveyInput,
        progress: &dyn DeliveryProgress,
    ) -> Result<SubmitSurveyOutput, SubmissionError> {
        let payload = self.prepare(&input)?;

        info!(
            "Submitting {} questions (max {} attempts, at most {:?})",
            self.questionnaire.len(),
            self.pipeline.policy().attempts(),
            self.pipeline.policy().worst_case_duration()
        );

        let receipt = self
            .pipeline
            .deliver(&payload, self.endpoint.as_deref(), progress)
            .await?;

        Ok(SubmitSurveyOutput { payload, receipt })
    }
}
