//! containers command - List containers
//!
//! Lists every container of the given service.

use clap::Args;
use cfos_core::container::{ListRequest, list_containers};

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// List the containers of a service
#[derive(Args, Debug)]
pub struct ContainersArgs {
    /// Service name
    pub service: String,
}

impl ContainersArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        positional("containers", [&self.service])
    }
}

/// Execute the containers command
pub async fn execute(args: ContainersArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, ListRequest::from_args(&args.positional())) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let client = match connect(&request.service, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = StageSpinner::new(&output_config);
    let result = list_containers(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
