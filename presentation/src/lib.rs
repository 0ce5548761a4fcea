//! Presentation layer for survey-relay
//!
//! This crate contains CLI definitions, output formatters
//! and delivery progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::{
    console::ConsoleFormatter, formatter::OutputFormatter, formatter_for, json::JsonFormatter,
};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
