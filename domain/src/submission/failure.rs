//! Classified delivery failures

use super::classifier::{ErrorCategory, categorize};
use serde::{Deserialize, Serialize};

/// Category of a failed delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The per-attempt deadline fired and the request was cancelled
    Timeout,
    /// Connectivity or other low-level transport fault
    Network,
    /// Anything else; retried like a transient failure
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Network => "network",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed attempt: its category plus the raw diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl DeliveryFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(timeout_ms: u64) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("Request timed out after {timeout_ms}ms"),
        )
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, message)
    }

    /// User-facing category. The kind decides when it is known; only
    /// `Unknown` failures fall back to matching the raw message.
    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            FailureKind::Timeout => ErrorCategory::Timeout,
            FailureKind::Network => ErrorCategory::Network,
            FailureKind::Unknown => categorize(&self.message),
        }
    }
}

impl std::fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let failure = DeliveryFailure::timeout(5000);
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.to_string(), "[timeout] Request timed out after 5000ms");
    }

    #[test]
    fn test_category_follows_kind_not_message() {
        let refused = DeliveryFailure::network("error sending request for url (http://host/timeout)");
        assert_eq!(refused.category(), ErrorCategory::Network);

        let slow = DeliveryFailure::timeout(250);
        assert_eq!(slow.category(), ErrorCategory::Timeout);

        assert_eq!(
            DeliveryFailure::unknown("HTTP 500 Internal Server Error").category(),
            ErrorCategory::Unknown
        );
        assert_eq!(
            DeliveryFailure::unknown("connection reset by peer").category(),
            ErrorCategory::Network
        );
    }
}
