//! Deliver Payload use case
//!
//! Sends a normalized payload with a per-attempt deadline, linear backoff
//! and a bounded number of attempts:
//!
//! ```text
//! Idle ─► Attempting(1) ─fail─► wait d·1 ─► Attempting(2) ─fail─► ... ─► Failed
//!              │                                  │
//!              └─────────────── ok ───────────────┴──────────────────► Success
//! ```
//!
//! Attempts are strictly sequential. A missing endpoint is a configuration
//! error and is reported before any attempt; retrying cannot fix it.

use crate::config::DeliveryPolicy;
use crate::ports::delivery_logger::{DeliveryLogEvent, DeliveryLogger, NoDeliveryLogger};
use crate::ports::delivery_progress::DeliveryProgress;
use crate::ports::submission_transport::{SubmissionTransport, TransportError};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use survey_domain::{DeliveryFailure, ErrorCategory, SubmissionPayload};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a delivery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Submission endpoint is not configured")]
    NotConfigured,

    #[error("Submission failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: DeliveryFailure,
    },
}

impl DeliveryError {
    /// Whether retrying later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, DeliveryError::Exhausted { .. })
    }

    /// Category used to pick the end-user message
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeliveryError::NotConfigured => ErrorCategory::Configuration,
            DeliveryError::Exhausted { last, .. } => last.category(),
        }
    }
}

/// Proof of a completed delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Attempt number that succeeded (1-based)
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Delivery loop around a [`SubmissionTransport`]
pub struct DeliveryPipeline<T: SubmissionTransport + 'static> {
    transport: Arc<T>,
    policy: DeliveryPolicy,
    logger: Arc<dyn DeliveryLogger>,
}

impl<T: SubmissionTransport + 'static> DeliveryPipeline<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            policy: DeliveryPolicy::default(),
            logger: Arc::new(NoDeliveryLogger),
        }
    }

    pub fn with_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DeliveryLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Deliver `payload` to `endpoint`.
    ///
    /// Makes at most [`DeliveryPolicy::attempts`] attempts. After a failed
    /// attempt `k` the progress notifier receives the classified failure and
    /// the backoff `initial_retry_delay * k`, or zero after the last attempt.
    pub async fn deliver(
        &self,
        payload: &SubmissionPayload,
        endpoint: Option<&str>,
        progress: &dyn DeliveryProgress,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) else {
            warn!("Submission endpoint is not configured; nothing was sent");
            self.logger.log(DeliveryLogEvent::new(
                "not_configured",
                serde_json::json!({}),
            ));
            return Err(DeliveryError::NotConfigured);
        };

        let started = Instant::now();
        let max_attempts = self.policy.attempts();
        let timeout_ms = self.policy.timeout.as_millis() as u64;

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("Delivery attempt {}/{} to {}", attempt, max_attempts, endpoint);
            progress.on_attempt_start(attempt, max_attempts);

            let failure = match self.attempt(endpoint, payload).await {
                Ok(()) => {
                    let elapsed = started.elapsed();
                    info!("Submission delivered on attempt {}", attempt);
                    self.logger.log(DeliveryLogEvent::new(
                        "delivered",
                        serde_json::json!({
                            "attempt": attempt,
                            "elapsed_ms": elapsed.as_millis() as u64,
                        }),
                    ));
                    progress.on_delivered(attempt);
                    return Ok(DeliveryReceipt {
                        attempts: attempt,
                        elapsed,
                    });
                }
                Err(e) => e.classify(timeout_ms),
            };

            let next_delay = if attempt == max_attempts {
                Duration::ZERO
            } else {
                self.policy.retry_delay(attempt)
            };

            warn!(
                "Delivery attempt {}/{} failed ({}): {}",
                attempt, max_attempts, failure.kind, failure.message
            );
            self.logger.log(DeliveryLogEvent::new(
                "attempt_failed",
                serde_json::json!({
                    "attempt": attempt,
                    "kind": failure.kind,
                    "message": failure.message,
                    "next_delay_ms": next_delay.as_millis() as u64,
                }),
            ));
            progress.on_attempt_failed(attempt, &failure, next_delay);

            if attempt == max_attempts {
                progress.on_exhausted(attempt, &failure);
                return Err(DeliveryError::Exhausted {
                    attempts: attempt,
                    last: failure,
                });
            }

            tokio::time::sleep(next_delay).await;
        }
    }

    /// One request bounded by the policy timeout.
    ///
    /// The deadline cancels the token handed to the transport and drops the
    /// in-flight future.
    async fn attempt(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        let cancel = CancellationToken::new();
        let request = self.transport.send(endpoint, payload, cancel.clone());

        tokio::select! {
            result = request => result,
            _ = tokio::time::sleep(self.policy.timeout) => {
                cancel.cancel();
                Err(TransportError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::delivery_progress::NoDeliveryProgress;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use survey_domain::{
        FailureKind, Question, Questionnaire, RankAssignmentStore, normalize,
    };

    // ==================== Test Mocks ====================

    enum Scripted {
        Succeed,
        Fail(TransportError),
        Hang,
    }

    struct MockTransport {
        script: Mutex<VecDeque<Scripted>>,
        calls: AtomicU32,
    }

    impl MockTransport {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(VecDeque::from(script)),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SubmissionTransport for MockTransport {
        async fn send(
            &self,
            _endpoint: &str,
            _payload: &SubmissionPayload,
            cancel: CancellationToken,
        ) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Scripted::Succeed);
            match next {
                Scripted::Succeed => Ok(()),
                Scripted::Fail(e) => Err(e),
                Scripted::Hang => {
                    cancel.cancelled().await;
                    Err(TransportError::Cancelled)
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        retries: Mutex<Vec<(u32, FailureKind, Duration)>>,
        starts: AtomicU32,
    }

    impl DeliveryProgress for RecordingProgress {
        fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_attempt_failed(&self, attempt: u32, failure: &DeliveryFailure, next_delay: Duration) {
            self.retries
                .lock()
                .unwrap()
                .push((attempt, failure.kind, next_delay));
        }
    }

    fn payload() -> SubmissionPayload {
        let questionnaire =
            Questionnaire::new(vec![Question::new("q1", "Pick", vec!["A".into()])]).unwrap();
        normalize(
            &questionnaire,
            &RankAssignmentStore::new(&questionnaire),
            BTreeMap::new(),
            "done".to_string(),
        )
    }

    fn network() -> Scripted {
        Scripted::Fail(TransportError::Network("connection refused".into()))
    }

    // ==================== Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_with_linear_backoff() {
        let transport = Arc::new(MockTransport::new(vec![network(), network(), Scripted::Succeed]));
        let pipeline = DeliveryPipeline::new(transport.clone());
        let progress = RecordingProgress::default();

        let receipt = pipeline
            .deliver(&payload(), Some("https://example.test/submit"), &progress)
            .await
            .unwrap();

        assert_eq!(receipt.attempts, 3);
        assert_eq!(transport.calls(), 3);
        assert_eq!(
            *progress.retries.lock().unwrap(),
            vec![
                (1, FailureKind::Network, Duration::from_millis(1_000)),
                (2, FailureKind::Network, Duration::from_millis(2_000)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_raises_once_with_attempt_count() {
        let transport = Arc::new(MockTransport::new(vec![
            network(),
            Scripted::Fail(TransportError::Other("HTTP 502".into())),
            Scripted::Fail(TransportError::Other("HTTP 503".into())),
        ]));
        let pipeline = DeliveryPipeline::new(transport.clone());
        let progress = RecordingProgress::default();

        let err = pipeline
            .deliver(&payload(), Some("https://example.test/submit"), &progress)
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), 3);
        assert!(err.to_string().contains("3 attempts"));
        assert!(err.to_string().contains("HTTP 503"));
        assert!(err.is_transient());

        let retries = progress.retries.lock().unwrap();
        assert_eq!(retries.len(), 3);
        assert_eq!(retries[2], (3, FailureKind::Unknown, Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cancels_in_flight_request() {
        let transport = Arc::new(MockTransport::new(vec![Scripted::Hang, Scripted::Succeed]));
        let pipeline = DeliveryPipeline::new(transport.clone());
        let progress = RecordingProgress::default();

        let started = tokio::time::Instant::now();
        let receipt = pipeline
            .deliver(&payload(), Some("https://example.test/submit"), &progress)
            .await
            .unwrap();

        assert_eq!(receipt.attempts, 2);
        // 5s deadline + 1s backoff
        assert!(started.elapsed() >= Duration::from_millis(6_000));
        assert_eq!(
            progress.retries.lock().unwrap()[0],
            (1, FailureKind::Timeout, Duration::from_millis(1_000))
        );
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_not_retried() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let pipeline = DeliveryPipeline::new(transport.clone());
        let progress = RecordingProgress::default();

        for endpoint in [None, Some(""), Some("   ")] {
            let err = pipeline
                .deliver(&payload(), endpoint, &progress)
                .await
                .unwrap_err();
            assert_eq!(err, DeliveryError::NotConfigured);
            assert!(!err.is_transient());
        }

        assert_eq!(transport.calls(), 0);
        assert_eq!(progress.starts.load(Ordering::SeqCst), 0);
        assert!(progress.retries.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_makes_one_attempt() {
        let transport = Arc::new(MockTransport::new(vec![network()]));
        let pipeline = DeliveryPipeline::new(transport.clone())
            .with_policy(DeliveryPolicy::default().with_max_retries(0));

        let err = pipeline
            .deliver(&payload(), Some("https://example.test"), &NoDeliveryProgress)
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert!(matches!(err, DeliveryError::Exhausted { attempts: 1, .. }));
    }
}
