//! Stage spinner for container commands
//!
//! Shows the current stage of a running command next to a spinner.

use cfos_core::StageReporter;

use super::OutputConfig;

/// Spinner wrapper
///
/// In quiet, JSON or no-progress mode the spinner is never drawn and stage
/// updates are only logged.
#[derive(Debug)]
pub struct StageSpinner {
    bar: Option<indicatif::ProgressBar>,
}

impl StageSpinner {
    /// Create a spinner for the given output configuration
    pub fn new(config: &OutputConfig) -> Self {
        let bar = if config.quiet || config.json || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl StageReporter for StageSpinner {
    fn set_stage(&self, stage: &str) {
        tracing::debug!(stage, "stage");
        if let Some(bar) = &self.bar {
            bar.set_message(stage.to_string());
        }
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
