//! create-container command - Create a container
//!
//! Creates a container on the given service, optionally with headers.
//! Headers use the `Name:Value` form or one of the shorthands (`-gr`
//! grants global read access, `-rm-gr` revokes it).

use clap::Args;
use cfos_core::container::{CreateRequest, create_container};
use cfos_core::headers::parse_headers;

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// Create a container
#[derive(Args, Debug)]
pub struct CreateContainerArgs {
    /// Service name
    pub service: String,

    /// Container name
    pub container: String,

    /// Headers as `Name:Value`, or a shorthand such as `-gr`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub headers: Vec<String>,
}

impl CreateContainerArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        positional(
            "create-container",
            [&self.service, &self.container].into_iter().chain(&self.headers),
        )
    }
}

/// Execute the create-container command
pub async fn execute(args: CreateContainerArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, CreateRequest::from_args(&args.positional())) {
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
    let result = create_container(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
