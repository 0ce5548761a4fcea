//! User-facing error classification
//!
//! Maps any surfaced failure to one short message. Matching is done on the
//! lowercased error text so it works on aggregate errors that embed the
//! last attempt's message.

/// Broad category shown to the end user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Network,
    Configuration,
    Unknown,
}

const TIMEOUT_MARKERS: &[&str] = &["timed out", "timeout", "abort"];
const NETWORK_MARKERS: &[&str] = &[
    "network",
    "connection",
    "failed to fetch",
    "unreachable",
    "dns",
];
const CONFIGURATION_MARKERS: &[&str] = &["not configured", "configuration"];

pub const TIMEOUT_MESSAGE: &str =
    "The server took too long to respond. Please try again in a moment.";
pub const NETWORK_MESSAGE: &str =
    "Could not reach the server. Please check your connection and try again.";
pub const CONFIGURATION_MESSAGE: &str =
    "The survey is not properly configured. Please contact the survey administrator.";
pub const GENERIC_MESSAGE: &str =
    "An error occurred while submitting your responses. Please try again.";

/// Categorize an error by the markers found in its message.
pub fn categorize(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();
    let has = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if has(TIMEOUT_MARKERS) {
        ErrorCategory::Timeout
    } else if has(NETWORK_MARKERS) {
        ErrorCategory::Network
    } else if has(CONFIGURATION_MARKERS) {
        ErrorCategory::Configuration
    } else {
        ErrorCategory::Unknown
    }
}

impl ErrorCategory {
    /// The message shown to the end user for this category
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => TIMEOUT_MESSAGE,
            ErrorCategory::Network => NETWORK_MESSAGE,
            ErrorCategory::Configuration => CONFIGURATION_MESSAGE,
            ErrorCategory::Unknown => GENERIC_MESSAGE,
        }
    }
}

/// Short human-readable message for a surfaced error. Never empty.
pub fn describe<E: std::fmt::Display + ?Sized>(error: &E) -> String {
    categorize(&error.to_string()).user_message().to_string()
}
