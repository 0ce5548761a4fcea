//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for survey-relay
#[derive(Parser, Debug)]
#[command(name = "survey-relay")]
#[command(author, version, about = "Validate, normalize and deliver ranked survey responses")]
#[command(long_about = r#"
survey-relay takes a questionnaire and a respondent's answer sheet, checks
that every question is answered and a final comment is present, then posts
the normalized responses to a collection endpoint with retries.

Configuration files are loaded from (in priority order):
1. SURVEY_RELAY_<SECTION>__<KEY>   Environment variables
2. --config <path>                  Explicit config file
3. ./survey-relay.toml              Project-level config
4. ~/.config/survey-relay/config.toml   Global config

Example:
  survey-relay -Q survey.toml --outline
  survey-relay -Q survey.toml -a answers.toml --dry-run
  survey-relay -Q survey.toml -a answers.toml --endpoint https://collect.example.org/hook
"#)]
pub struct Cli {
    /// Questionnaire file (TOML)
    #[arg(short = 'Q', long, value_name = "PATH")]
    pub questionnaire: PathBuf,

    /// Answer sheet file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub answers: Option<PathBuf>,

    /// Final comment (overrides the answer sheet's comment)
    #[arg(short, long, value_name = "TEXT")]
    pub comment: Option<String>,

    /// Collection endpoint URL
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum delivery attempts
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Validate and print the payload without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the questionnaire's section outline and exit
    #[arg(long)]
    pub outline: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
