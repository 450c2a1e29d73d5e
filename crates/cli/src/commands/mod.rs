//! CLI command definitions and execution
//!
//! Every container command follows the same shape: validate what can be
//! validated offline, resolve the service and authenticate, run the core
//! operation with a stage spinner, then print the report or the error.

use clap::{Parser, Subcommand};
use cfos_core::{ColorMode, ConfigManager, Defaults, Report, ServiceManager};
use cfos_swift::SwiftClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod container;
mod containers;
mod create;
mod delete;
mod rename;
mod service;
mod update;

/// cfos - Swift container management
///
/// Manage the containers of Swift-compatible object storage services:
/// list, inspect, create, delete, update metadata and rename.
#[derive(Parser, Debug)]
#[command(name = "cfos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage object storage services
    #[command(subcommand)]
    Service(service::ServiceCommands),

    /// List the containers of a service
    Containers(containers::ContainersArgs),

    /// Show a container's summary and metadata headers
    Container(container::ContainerArgs),

    /// Create a container
    CreateContainer(create::CreateContainerArgs),

    /// Delete a container
    DeleteContainer(delete::DeleteContainerArgs),

    /// Set metadata headers on an existing container
    UpdateContainer(update::UpdateContainerArgs),

    /// Rename a container by moving its objects to a new one
    RenameContainer(rename::RenameContainerArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let defaults = load_defaults();
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    }
    .with_defaults(&defaults);

    if output_config.no_color || output_config.json {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    } else if defaults.color == ColorMode::Always {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(true);
    }

    match cli.command {
        Commands::Service(cmd) => service::execute(cmd, output_config).await,
        Commands::Containers(args) => containers::execute(args, output_config).await,
        Commands::Container(args) => container::execute(args, output_config).await,
        Commands::CreateContainer(args) => create::execute(args, output_config).await,
        Commands::DeleteContainer(args) => delete::execute(args, output_config).await,
        Commands::UpdateContainer(args) => update::execute(args, output_config).await,
        Commands::RenameContainer(args) => rename::execute(args, output_config).await,
    }
}

/// Output defaults from the config file
///
/// An unreadable config is reported by the command that needs the services;
/// output falls back to the built-in defaults.
fn load_defaults() -> Defaults {
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config.defaults,
        Err(e) => {
            tracing::warn!(error = %e, "using built-in output defaults");
            Defaults::default()
        }
    }
}

/// Resolve a service by name and authenticate against it
///
/// Errors are printed through the formatter; the caller only returns the code.
async fn connect(service_name: &str, formatter: &Formatter) -> Result<SwiftClient, ExitCode> {
    let manager = ServiceManager::new().map_err(|e| {
        formatter.error(&format!("Failed to load services: {e}"));
        ExitCode::GeneralError
    })?;

    let service = manager.get(service_name).map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::from(&e)
    })?;

    let client = SwiftClient::new(service).await.map_err(|e| {
        formatter.error(&format!("Failed to connect to {service_name}: {e}"));
        ExitCode::from(&e)
    })?;
    tracing::debug!(service = service_name, storage_url = %client.storage_url(), "connected");

    Ok(client)
}

/// Lay out a command's values the way `from_args` reads them:
/// program, command, then the positional arguments
fn positional<'a>(command: &str, values: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    ["cfos", command]
        .into_iter()
        .map(String::from)
        .chain(values.into_iter().cloned())
        .collect()
}

/// Unwrap a parsed request, printing the usage error if there is one
fn request<T>(formatter: &Formatter, parsed: cfos_core::Result<T>) -> Result<T, ExitCode> {
    parsed.map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::from(&e)
    })
}

/// Print the outcome of a container command
fn emit<R: Report>(formatter: &Formatter, result: cfos_core::Result<R>) -> ExitCode {
    match result {
        Ok(report) => {
            formatter.report(&report);
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}
