//! Delivery policy: retry loop control.
//!
//! [`DeliveryPolicy`] groups the static parameters of the delivery loop in
//! [`DeliveryPipeline`](crate::use_cases::deliver_payload::DeliveryPipeline).
//! Backoff grows linearly: the delay after attempt `k` is
//! `initial_retry_delay * k`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry, timeout and backoff parameters for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    /// Total number of network attempts per submission.
    pub max_retries: u32,
    /// Deadline for a single attempt.
    pub timeout: Duration,
    /// Delay after the first failed attempt; later delays are multiples.
    pub initial_retry_delay: Duration,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout: Duration::from_millis(5_000),
            initial_retry_delay: Duration::from_millis(1_000),
        }
    }
}

impl DeliveryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_initial_retry_delay(mut self, delay: Duration) -> Self {
        self.initial_retry_delay = delay;
        self
    }

    // ==================== Derived Values ====================

    /// Attempts actually made. A zero limit still makes one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Backoff before attempt `attempt + 1`.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.initial_retry_delay * attempt
    }

    /// Upper bound on wall time: every attempt times out and every backoff
    /// is taken.
    pub fn worst_case_duration(&self) -> Duration {
        let attempts = self.attempts();
        let backoff: Duration = (1..attempts).map(|k| self.retry_delay(k)).sum();
        self.timeout * attempts + backoff
    }
}
