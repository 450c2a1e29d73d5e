//! cfos - Swift container management CLI
//!
//! Lists, inspects, creates, deletes, updates and renames containers of
//! Swift-compatible object storage services.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cfos_cli::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay parseable
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
