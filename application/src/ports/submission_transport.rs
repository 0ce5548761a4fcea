//! Submission transport port
//!
//! Defines how a normalized payload reaches the remote collection endpoint.

use async_trait::async_trait;
use survey_domain::{DeliveryFailure, SubmissionPayload};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors a transport adapter can report for one request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request was aborted through its cancellation token
    #[error("Request cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed: {0}")]
    Other(String),
}

impl TransportError {
    /// Map onto the delivery failure taxonomy.
    ///
    /// Cancellation only happens when the per-attempt deadline fires, so it
    /// is reported as a timeout.
    pub fn classify(&self, timeout_ms: u64) -> DeliveryFailure {
        match self {
            TransportError::Cancelled => DeliveryFailure::timeout(timeout_ms),
            TransportError::Network(message) => DeliveryFailure::network(message.clone()),
            TransportError::Other(message) => DeliveryFailure::unknown(message.clone()),
        }
    }
}

/// Transport for delivering submissions
///
/// `Ok(())` means the request completed without the client observing an
/// error. Adapters must stop work promptly once `cancel` fires.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
        cancel: CancellationToken,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_domain::FailureKind;

    #[test]
    fn test_classify() {
        assert_eq!(
            TransportError::Cancelled.classify(5000).kind,
            FailureKind::Timeout
        );
        assert_eq!(
            TransportError::Network("refused".into()).classify(5000).kind,
            FailureKind::Network
        );
        let other = TransportError::Other("HTTP 500".into()).classify(5000);
        assert_eq!(other.kind, FailureKind::Unknown);
        assert_eq!(other.message, "HTTP 500");
    }
}
