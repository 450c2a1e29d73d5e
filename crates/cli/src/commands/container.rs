//! container command - Inspect a container

use clap::Args;
use cfos_core::container::{InspectRequest, inspect_container};

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// Show a container's summary and metadata headers
#[derive(Args, Debug)]
pub struct ContainerArgs {
    /// Service name
    pub service: String,

    /// Container name
    pub container: String,
}

impl ContainerArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        positional("container", [&self.service, &self.container])
    }
}

/// Execute the container command
pub async fn execute(args: ContainerArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, InspectRequest::from_args(&args.positional())) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let client = match connect(&request.service, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = StageSpinner::new(&output_config);
    let result = inspect_container(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
