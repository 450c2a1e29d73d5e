//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also drives the stage spinner shown while a
//! command waits on the storage service.

mod formatter;
mod progress;

use cfos_core::{ColorMode, Defaults, OutputFormat};

pub use formatter::Formatter;
pub use progress::StageSpinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Fill in what the flags left unset from the configured defaults
    pub fn with_defaults(self, defaults: &Defaults) -> Self {
        Self {
            json: self.json || defaults.output == OutputFormat::Json,
            no_color: self.no_color || defaults.color == ColorMode::Never,
            no_progress: self.no_progress || !defaults.progress,
            quiet: self.quiet,
        }
    }
}
