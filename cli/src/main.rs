//! CLI entrypoint for survey-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use survey_application::{
    DeliveryPipeline, DeliveryProgress, NoDeliveryProgress, SubmissionError, SubmitSurveyUseCase,
};
use survey_infrastructure::{
    ConfigLoader, FileAnswerSheet, FileConfig, FileOutputFormat, FileQuestionnaire,
    HttpSubmissionTransport, JsonlDeliveryLogger,
};
use survey_presentation::{
    Cli, OutputFormat, OutputFormatter, ProgressReporter, SimpleProgress, formatter_for,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when validation blocks the submission
const EXIT_INCOMPLETE: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });
    let formatter = formatter_for(format);

    let questionnaire = FileQuestionnaire::load(&cli.questionnaire)
        .with_context(|| format!("Failed to load {}", cli.questionnaire.display()))?;
    info!(
        "Loaded {} questions from {}",
        questionnaire.len(),
        cli.questionnaire.display()
    );

    if cli.outline {
        println!("{}", formatter.format_outline(&questionnaire));
        return Ok(ExitCode::SUCCESS);
    }

    let sheet = match &cli.answers {
        Some(path) => FileAnswerSheet::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => FileAnswerSheet::default(),
    };
    let input = match sheet.into_input(&questionnaire, cli.comment.clone()) {
        Ok(input) => input,
        Err(e) if e.is_questionnaire_mismatch() => {
            return Err(e).context("Answer sheet does not match the questionnaire");
        }
        Err(e) => return Err(e).context("Invalid answer sheet"),
    };

    // === Dependency Injection ===
    let transport = HttpSubmissionTransport::new()
        .require_success_status(config.delivery.require_success_status);
    let mut pipeline =
        DeliveryPipeline::new(Arc::new(transport)).with_policy(config.delivery.to_policy());
    if let Some(path) = &config.delivery.log_file
        && let Some(logger) = JsonlDeliveryLogger::new(path)
    {
        info!("Delivery log: {}", logger.path().display());
        pipeline = pipeline.with_logger(Arc::new(logger));
    }

    let use_case = SubmitSurveyUseCase::new(
        Arc::new(questionnaire),
        pipeline,
        config.delivery.endpoint().map(str::to_string),
    );

    if cli.dry_run {
        return Ok(match use_case.prepare(&input) {
            Ok(payload) => {
                println!("{}", formatter.format_payload(&payload));
                ExitCode::SUCCESS
            }
            Err(e) => report_failure(&*formatter, &e),
        });
    }

    let progress: Box<dyn DeliveryProgress> = if cli.quiet {
        Box::new(NoDeliveryProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    match use_case.execute_with_progress(input, progress.as_ref()).await {
        Ok(output) => {
            println!("{}", formatter.format_delivered(&output));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_failure(&*formatter, &e)),
    }
}

/// Resolve configuration from files, environment and command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    if let Some(endpoint) = &cli.endpoint {
        config.delivery.endpoint = Some(endpoint.clone());
    }
    if let Some(max_retries) = cli.max_retries {
        config.delivery.max_retries = max_retries;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.delivery.timeout_ms = timeout_ms;
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }

    Ok(config)
}

fn report_failure(formatter: &dyn OutputFormatter, error: &SubmissionError) -> ExitCode {
    println!("{}", formatter.format_failure(error));
    match error {
        SubmissionError::Incomplete(_) => ExitCode::from(EXIT_INCOMPLETE),
        other => {
            warn!("Submission failed: {}", other);
            ExitCode::FAILURE
        }
    }
}
