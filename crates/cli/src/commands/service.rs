//! Service management commands
//!
//! A service is a named Swift-compatible object storage endpoint with the
//! credentials used to authenticate against it. Container commands refer to
//! services by name.

use clap::Subcommand;
use comfy_table::Table;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use cfos_core::{AuthVersion, Service, ServiceManager};

/// Service subcommands for managing storage service connections
#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// Add or update a service
    Set(SetArgs),

    /// List all configured services
    List(ListArgs),

    /// Remove a service
    Remove(RemoveArgs),
}

/// Arguments for the `service set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Service name (e.g., "object-storage", "swift-dev")
    pub name: String,

    /// Identity endpoint URL (e.g., "https://identity.example.com/v3")
    pub auth_url: String,

    /// User name (`account:user` for v1)
    pub username: String,

    /// Password (key for v1)
    pub password: String,

    /// Identity API version: v1 or v3
    #[arg(long, default_value = "v3")]
    pub auth_version: AuthVersion,

    /// Project ID to scope the token to (v3)
    #[arg(long)]
    pub project_id: Option<String>,

    /// User domain name (v3)
    #[arg(long, default_value = "Default")]
    pub domain: String,

    /// Region of the object-store endpoint (v3)
    #[arg(long)]
    pub region: Option<String>,

    /// Allow insecure TLS connections
    #[arg(long, default_value = "false")]
    pub insecure: bool,
}

/// Arguments for the `service list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including project and region
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `service remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the service to remove
    pub name: String,
}

/// JSON output for service list
#[derive(Serialize)]
struct ServiceListOutput {
    services: Vec<ServiceInfo>,
}

/// Service information for JSON output (without credentials)
#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: String,
    auth_url: String,
    auth_version: AuthVersion,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

impl From<&Service> for ServiceInfo {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            auth_url: service.auth_url.clone(),
            auth_version: service.auth_version,
            username: service.username.clone(),
            project_id: service.project_id.clone(),
            region: service.region.clone(),
        }
    }
}

/// JSON output for service set/remove operations
#[derive(Serialize)]
struct ServiceOperationOutput {
    success: bool,
    service: String,
    message: String,
}

/// Execute a service subcommand
pub async fn execute(cmd: ServiceCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ServiceManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to load services: {e}"));
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        ServiceCommands::Set(args) => execute_set(args, &manager, &formatter),
        ServiceCommands::List(args) => execute_list(args, &manager, &formatter),
        ServiceCommands::Remove(args) => execute_remove(args, &manager, &formatter),
    }
}

fn execute_set(args: SetArgs, manager: &ServiceManager, formatter: &Formatter) -> ExitCode {
    if args.name.is_empty() {
        formatter.error("Service name cannot be empty");
        return ExitCode::UsageError;
    }

    if let Err(e) = url::Url::parse(&args.auth_url) {
        formatter.error(&format!("Invalid auth URL '{}': {e}", args.auth_url));
        return ExitCode::UsageError;
    }

    let existed = manager.exists(&args.name).unwrap_or(false);

    let mut service = Service::new(&args.name, &args.auth_url, &args.username, &args.password);
    service.auth_version = args.auth_version;
    service.project_id = args.project_id;
    service.domain_name = args.domain;
    service.region = args.region;
    service.insecure = args.insecure;

    match manager.set(service) {
        Ok(()) => {
            let verb = if existed { "updated" } else { "added" };
            let message = format!("Service '{}' {verb}", args.name);
            if formatter.is_json() {
                formatter.json(&ServiceOperationOutput {
                    success: true,
                    service: args.name,
                    message,
                });
            } else {
                formatter.success(&format!("{message}."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

fn execute_list(args: ListArgs, manager: &ServiceManager, formatter: &Formatter) -> ExitCode {
    let services = match manager.list() {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&ServiceListOutput {
            services: services.iter().map(ServiceInfo::from).collect(),
        });
    } else if services.is_empty() {
        formatter.println("No services configured.");
    } else {
        formatter.println(&service_table(&services, args.long).to_string());
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ServiceManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            let message = format!("Service '{}' removed", args.name);
            if formatter.is_json() {
                formatter.json(&ServiceOperationOutput {
                    success: true,
                    service: args.name,
                    message,
                });
            } else {
                formatter.success(&format!("{message}."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

fn service_table(services: &[Service], long: bool) -> Table {
    let mut table = Table::new();
    if long {
        table.set_header(vec!["NAME", "AUTH URL", "AUTH", "USER", "PROJECT", "REGION"]);
        for s in services {
            table.add_row(vec![
                s.name.clone(),
                s.auth_url.clone(),
                s.auth_version.to_string(),
                s.username.clone(),
                s.project_id.clone().unwrap_or_default(),
                s.region.clone().unwrap_or_default(),
            ]);
        }
    } else {
        table.set_header(vec!["NAME", "AUTH URL"]);
        for s in services {
            table.add_row(vec![s.name.clone(), s.auth_url.clone()]);
        }
    }
    table
}
