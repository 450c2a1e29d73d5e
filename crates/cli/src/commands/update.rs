//! update-container command - Update container metadata
//!
//! Sends the given headers to an existing container. Headers that are not
//! named are left as they are.

use clap::Args;
use cfos_core::container::{UpdateRequest, update_container};
use cfos_core::headers::parse_headers;

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// Set metadata headers on an existing container
#[derive(Args, Debug)]
pub struct UpdateContainerArgs {
    /// Service name
    pub service: String,

    /// Container name
    pub container: String,

    /// Headers as `Name:Value`, or a shorthand such as `-rm-gr`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub headers: Vec<String>,
}

impl UpdateContainerArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        positional(
            "update-container",
            [&self.service, &self.container].into_iter().chain(&self.headers),
        )
    }
}

/// Execute the update-container command
pub async fn execute(args: UpdateContainerArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, UpdateRequest::from_args(&args.positional())) {
        Ok(r) => r,
        Err(code) => return code,
    };

    // Reject malformed headers before authenticating
    if let Err(e) = parse_headers(&request.headers) {
        formatter.error(&e.to_string());
        return ExitCode::from(&e);
    }

    let client = match connect(&request.service, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = StageSpinner::new(&output_config);
    let result = update_container(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
