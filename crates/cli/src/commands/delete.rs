//! delete-container command - Delete a container

use clap::Args;
use cfos_core::container::{DeleteRequest, FORCE_FLAG, delete_container};

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// Delete a container
#[derive(Args, Debug)]
pub struct DeleteContainerArgs {
    /// Service name
    pub service: String,

    /// Container name
    pub container: String,

    /// Delete every object in the container first
    #[arg(short = 'f', long)]
    pub force: bool,
}

impl DeleteContainerArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        let mut args = positional("delete-container", [&self.service, &self.container]);
        if self.force {
            args.push(FORCE_FLAG.to_string());
        }
        args
    }
}

/// Execute the delete-container command
pub async fn execute(args: DeleteContainerArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, DeleteRequest::from_args(&args.positional())) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let client = match connect(&request.service, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = StageSpinner::new(&output_config);
    let result = delete_container(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
