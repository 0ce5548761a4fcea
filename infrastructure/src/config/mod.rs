//! Configuration file loading for survey-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SURVEY_RELAY_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./survey-relay.toml` or `./.survey-relay.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/survey-relay/config.toml`
//! 5. Default values

mod file_config;
mod issues;
mod loader;

pub use file_config::{FileConfig, FileDeliveryConfig, FileOutputConfig, FileOutputFormat};
pub use issues::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::ConfigLoader;
