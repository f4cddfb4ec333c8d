//! Client subcommand handlers.

use std::time::Duration;

use futures::StreamExt;
use tracing::warn;

use tracebus_config::{Config, ConfigValidator};
use tracebus_core::MappingRecord;
use tracebus_protocols::{MapKeyValueEntry, MappingType};

use crate::cli::{Commands, MappingFormat};
use crate::client::TraceClient;

/// Handle client subcommands.
pub(crate) async fn handle_client_command(
    command: Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    for warning in ConfigValidator::validate_for_client(config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    let client = TraceClient::new(
        config.client.endpoint.clone(),
        Duration::from_secs(config.client.timeout_seconds),
    );

    match command {
        Commands::Types => {
            print_names(client.resource_types().await?);
        }
        Commands::Resources { resource_type } => {
            print_names(client.resources(&resource_type).await?);
        }
        Commands::Config { resource_type, name } => {
            print_entries(&client.config(&resource_type, &name).await?);
        }
        Commands::Trace { resource_type, name } => {
            print_entries(&client.trace(&resource_type, &name).await?);
        }
        Commands::Exec { resource_type, name, command, args } => {
            let mut stream = client.execute(&resource_type, &name, &command, &args).await?;
            while let Some(message) = stream.next().await {
                println!("{}", message?);
            }
        }
        Commands::Mapping { format, problems } => {
            let records: Vec<_> = client
                .resource_mapping()
                .await?
                .into_iter()
                .filter(|r| !problems || r.mapping_type != MappingType::Normal)
                .collect();
            print_mapping(&records, format)?;
        }
        Commands::Serve { .. } => return Err("serve is not a client command".into()),
    }

    Ok(())
}

fn print_names(mut names: Vec<String>) {
    names.sort();
    for name in names {
        println!("{}", name);
    }
}

fn print_entries(entries: &[MapKeyValueEntry]) {
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in entries {
        println!("{:<width$}  {}", entry.key, entry.value, width = width);
    }
}

fn print_mapping(
    records: &[MappingRecord],
    format: MappingFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == MappingFormat::Json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No mapping records.");
        return Ok(());
    }

    println!("{:<8} {:<40} {:<32} {}", "TYPE", "POD", "RESOURCE", "FACTORY_RESOURCE");
    println!("{}", "-".repeat(100));
    for record in records {
        println!(
            "{:<8} {:<40} {:<32} {}",
            record.mapping_type.to_string(),
            dash_if_empty(&record.pod_name),
            dash_if_empty(&record.resource_name),
            dash_if_empty(&record.factory_resource_name),
        );
    }

    let errors = records
        .iter()
        .filter(|r| r.mapping_type == MappingType::Error)
        .count();
    if errors > 0 {
        println!("\n{} record(s) in error state", errors);
    }

    Ok(())
}

fn dash_if_empty(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
