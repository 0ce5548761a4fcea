//! Delivery configuration from TOML (`[delivery]` section)

use crate::config::issues::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use survey_application::DeliveryPolicy;

/// Raw delivery configuration from TOML
///
/// # Example
///
/// ```toml
/// [delivery]
/// endpoint = "https://collect.example.org/submit"
/// max_retries = 3
/// timeout_ms = 5000
/// initial_retry_delay_ms = 1000
/// require_success_status = false   # false: any completed request counts
/// log_file = "logs/deliveries.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliveryConfig {
    /// Collection endpoint URL
    pub endpoint: Option<String>,
    /// Total attempts per submission
    pub max_retries: u32,
    /// Per-attempt deadline in milliseconds
    pub timeout_ms: u64,
    /// First backoff delay in milliseconds (grows linearly)
    pub initial_retry_delay_ms: u64,
    /// Treat non-2xx responses as failures instead of opaque successes
    pub require_success_status: bool,
    /// JSONL file receiving raw delivery diagnostics
    pub log_file: Option<PathBuf>,
}

impl Default for FileDeliveryConfig {
    fn default() -> Self {
        let policy = DeliveryPolicy::default();
        Self {
            endpoint: None,
            max_retries: policy.max_retries,
            timeout_ms: policy.timeout.as_millis() as u64,
            initial_retry_delay_ms: policy.initial_retry_delay.as_millis() as u64,
            require_success_status: false,
            log_file: None,
        }
    }
}

impl FileDeliveryConfig {
    /// Endpoint with surrounding whitespace removed; `None` when blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    pub fn to_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_initial_retry_delay(Duration::from_millis(self.initial_retry_delay_ms))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        match self.endpoint() {
            None => issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::MissingEndpoint,
                message: "delivery.endpoint is not set; submissions will fail until it is configured"
                    .to_string(),
            }),
            Some(endpoint) if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") => {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::InvalidEndpoint {
                        value: endpoint.to_string(),
                    },
                    message: format!("delivery.endpoint: '{endpoint}' is not an http(s) URL"),
                });
            }
            Some(_) => {}
        }

        if self.max_retries == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroValue {
                    field: "delivery.max_retries".to_string(),
                },
                message: "delivery.max_retries is 0; a single attempt will still be made"
                    .to_string(),
            });
        }

        if self.timeout_ms == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::ZeroValue {
                    field: "delivery.timeout_ms".to_string(),
                },
                message: "delivery.timeout_ms must be greater than zero".to_string(),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_policy() {
        let config = FileDeliveryConfig {
            max_retries: 4,
            timeout_ms: 100,
            initial_retry_delay_ms: 20,
            ..Default::default()
        };
        let policy = config.to_policy();
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.timeout, Duration::from_millis(100));
        assert_eq!(policy.initial_retry_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_blank_endpoint_is_none() {
        let config = FileDeliveryConfig {
            endpoint: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), None);
    }

    #[test]
    fn test_validate_errors() {
        let config = FileDeliveryConfig {
            endpoint: Some("ftp://nope".to_string()),
            max_retries: 0,
            timeout_ms: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].is_error());
        assert_eq!(issues[1].severity, Severity::Warning);
        assert!(issues[2].is_error());
    }
}
