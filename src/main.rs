//! tracebus - registry and introspection bus for container-networking agents
//!
//! Main entry point for the endpoint and the debugging client.

mod cli;
mod client;
mod cmd_client;
mod self_trace;
mod server;

use clap::Parser;

use tracebus_config::ConfigLoader;

use crate::cli::{Cli, Commands};
use crate::cmd_client::handle_client_command;
use crate::server::{init_client_tracing, init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| ConfigLoader::tracebus_dir().join("config.toml"));
    let mut config = ConfigLoader::load_or_default(&config_path)?;

    if let Some(endpoint) = cli.endpoint {
        config.client.endpoint = endpoint;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_tracing(&config.logging)?;
            run_server(config).await
        }
        command => {
            init_client_tracing();
            handle_client_command(command, &config).await
        }
    }
}
