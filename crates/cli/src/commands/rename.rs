//! rename-container command - Rename a container
//!
//! Swift has no rename, so the new container is created with the old one's
//! headers, every object is moved across and the old container is deleted.
//! A failure part way leaves both containers in place.

use clap::Args;
use cfos_core::container::{RenameRequest, rename_container};

use super::{connect, emit, positional, request};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, StageSpinner};

/// Rename a container
#[derive(Args, Debug)]
pub struct RenameContainerArgs {
    /// Service name
    pub service: String,

    /// Current container name
    pub container: String,

    /// New container name
    pub new_container: String,
}

impl RenameContainerArgs {
    pub(super) fn positional(&self) -> Vec<String> {
        positional(
            "rename-container",
            [&self.service, &self.container, &self.new_container],
        )
    }
}

/// Execute the rename-container command
pub async fn execute(args: RenameContainerArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match request(&formatter, RenameRequest::from_args(&args.positional())) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let client = match connect(&request.service, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = StageSpinner::new(&output_config);
    let result = rename_container(&client, &spinner, &request).await;
    spinner.finish_and_clear();

    emit(&formatter, result)
}
