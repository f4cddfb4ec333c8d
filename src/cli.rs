//! CLI definitions for tracebus.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tracebus CLI.
#[derive(Parser)]
#[command(name = "tracebus")]
#[command(about = "Registry and introspection bus for container-networking agents")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.tracebus/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Endpoint of a running tracebus server (overrides client.endpoint)
    #[arg(short, long, global = true, env = "TRACEBUS_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the introspection endpoint in foreground
    Serve {
        /// Server host (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List registered resource types
    Types,

    /// List resources of a type
    Resources {
        /// Resource type (e.g. resource_pool)
        resource_type: String,
    },

    /// Show the static config of a resource
    Config {
        resource_type: String,
        name: String,
    },

    /// Show the runtime trace of a resource
    Trace {
        resource_type: String,
        name: String,
    },

    /// Execute a diagnostic command on a resource and stream its output
    Exec {
        resource_type: String,
        name: String,
        command: String,

        /// Command arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show pod-to-resource mapping health
    Mapping {
        /// Output format
        #[arg(long, value_enum, default_value_t = MappingFormat::Table)]
        format: MappingFormat,

        /// Only show records that are not normal
        #[arg(long)]
        problems: bool,
    },
}

/// Output format of `tracebus mapping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MappingFormat {
    Table,
    Json,
}
