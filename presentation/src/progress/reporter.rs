//! Progress reporting for survey delivery

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use survey_application::DeliveryProgress;
use survey_domain::DeliveryFailure;

/// Spinner that follows the delivery attempts
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn attempt_prefix(attempt: u32, max_attempts: u32) -> String {
        format!("Attempt {}/{}", attempt, max_attempts)
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryProgress for ProgressReporter {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let pb = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_prefix(Self::attempt_prefix(attempt, max_attempts));
        pb.set_message("Sending...");
    }

    fn on_attempt_failed(&self, attempt: u32, failure: &DeliveryFailure, next_delay: Duration) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.println(format!("  {} attempt {}: {}", "x".red(), attempt, failure));
            if !next_delay.is_zero() {
                pb.set_message(format!("Retrying in {} ms", next_delay.as_millis()));
            }
        }
    }

    fn on_delivered(&self, attempt: u32) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_with_message(format!("{} (attempt {})", "Delivered".green(), attempt));
        }
    }

    fn on_exhausted(&self, attempts: u32, _failure: &DeliveryFailure) {
        if let Some(pb) = self.take_spinner() {
            pb.abandon_with_message(format!("{} after {} attempts", "Gave up".red(), attempts));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliveryProgress for SimpleProgress {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::attempt_prefix(attempt, max_attempts).bold()
        );
    }

    fn on_attempt_failed(&self, attempt: u32, failure: &DeliveryFailure, next_delay: Duration) {
        if next_delay.is_zero() {
            eprintln!("  {} attempt {}: {}", "x".red(), attempt, failure);
        } else {
            eprintln!(
                "  {} attempt {}: {} (retrying in {} ms)",
                "x".red(),
                attempt,
                failure,
                next_delay.as_millis()
            );
        }
    }

    fn on_delivered(&self, attempt: u32) {
        eprintln!("  {} delivered on attempt {}", "v".green(), attempt);
    }
}
