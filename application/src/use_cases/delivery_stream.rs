//! Attempt events as a finite sequence.
//!
//! [`SubmitSurveyUseCase::start`](super::submit_survey::SubmitSurveyUseCase::start)
//! runs a submission in the background and hands back a [`DeliveryHandle`].
//! The handle yields every attempt outcome in order and always ends with a
//! single [`DeliveryEvent::Finished`].

use super::submit_survey::{SubmissionError, SubmitSurveyOutput};
use crate::ports::delivery_progress::DeliveryProgress;
use futures::Stream;
use std::time::Duration;
use survey_domain::DeliveryFailure;
use tokio::sync::mpsc;

/// One step of a background submission
#[derive(Debug)]
pub enum DeliveryEvent {
    AttemptStarted {
        attempt: u32,
        max_attempts: u32,
    },
    /// `next_delay` is zero after the last attempt
    AttemptFailed {
        attempt: u32,
        failure: DeliveryFailure,
        next_delay: Duration,
    },
    /// Terminal event
    Finished(Result<SubmitSurveyOutput, SubmissionError>),
}

impl DeliveryEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryEvent::Finished(_))
    }
}

/// Receiving end of a background submission.
pub struct DeliveryHandle {
    receiver: mpsc::UnboundedReceiver<DeliveryEvent>,
}

impl DeliveryHandle {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<DeliveryEvent>) -> Self {
        Self { receiver }
    }

    /// Next event, or `None` once the sequence is over.
    pub async fn next(&mut self) -> Option<DeliveryEvent> {
        self.receiver.recv().await
    }

    /// Consume the handle as a `Stream` of events.
    pub fn into_stream(self) -> impl Stream<Item = DeliveryEvent> {
        futures::stream::unfold(self, |mut handle| async move {
            handle.next().await.map(|event| (event, handle))
        })
    }

    /// Drain all events and return the final result.
    pub async fn wait(mut self) -> Result<SubmitSurveyOutput, SubmissionError> {
        while let Some(event) = self.next().await {
            if let DeliveryEvent::Finished(result) = event {
                return result;
            }
        }
        Err(SubmissionError::Interrupted)
    }
}

/// Adapter: `DeliveryProgress` → channel of [`DeliveryEvent`]s
pub struct ChannelProgress {
    sender: mpsc::UnboundedSender<DeliveryEvent>,
}

impl ChannelProgress {
    pub fn new(sender: mpsc::UnboundedSender<DeliveryEvent>) -> Self {
        Self { sender }
    }
}

impl DeliveryProgress for ChannelProgress {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        // receiver may already be gone; the submission continues regardless
        let _ = self.sender.send(DeliveryEvent::AttemptStarted {
            attempt,
            max_attempts,
        });
    }

    fn on_attempt_failed(&self, attempt: u32, failure: &DeliveryFailure, next_delay: Duration) {
        let _ = self.sender.send(DeliveryEvent::AttemptFailed {
            attempt,
            failure: failure.clone(),
            next_delay,
        });
    }
}
