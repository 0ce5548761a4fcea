//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod delivery;
mod output;

pub use delivery::FileDeliveryConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use super::issues::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Delivery endpoint, retry and timeout settings
    pub delivery: FileDeliveryConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.delivery.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigIssueCode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[delivery]
endpoint = "https://collect.example.org/submit"
max_retries = 5
timeout_ms = 2500
initial_retry_delay_ms = 200
require_success_status = true
log_file = "/tmp/deliveries.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.delivery.endpoint(),
            Some("https://collect.example.org/submit")
        );
        assert_eq!(config.delivery.max_retries, 5);
        assert_eq!(config.delivery.timeout_ms, 2500);
        assert!(config.delivery.require_success_status);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[delivery]
endpoint = "https://collect.example.org/submit"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.delivery.max_retries, 3);
        assert_eq!(config.delivery.timeout_ms, 5000);
        assert_eq!(config.delivery.initial_retry_delay_ms, 1000);
        assert!(!config.delivery.require_success_status);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_warns_about_endpoint() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingEndpoint);
        assert!(!issues[0].is_error());
    }
}
