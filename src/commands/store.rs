//! Persistent store maintenance CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use devpulse_core::error::AppError;
use devpulse_core::result::AppResult;
use devpulse_service::Session;
use devpulse_storage::keys;

use crate::output::{self, OutputFormat};

/// Arguments for store commands
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Store subcommand
    #[command(subcommand)]
    pub command: StoreCommand,
}

/// Store subcommands
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Check the backend and list stored keys
    Health,
    /// Delete every DevPulse collection (demo data is reseeded on next start)
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Write any collection that failed to persist
    Flush,
}

#[derive(Debug, Serialize)]
struct HealthReport {
    provider: String,
    healthy: bool,
    keys: Vec<String>,
}

/// Execute store commands
pub async fn execute(args: &StoreArgs, session: &Session, format: OutputFormat) -> AppResult<()> {
    let store = session.store();

    match &args.command {
        StoreCommand::Health => {
            let report = HealthReport {
                provider: store.provider_type().to_string(),
                healthy: store.health_check().await?,
                keys: store.keys().await?,
            };
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    output::print_kv("Provider", &report.provider);
                    output::print_kv("Healthy", if report.healthy { "yes" } else { "no" });
                    output::print_kv("Keys", &report.keys.join(", "));
                }
            }
        }
        StoreCommand::Reset { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Delete ALL threads, notifications, and likes?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            for key in keys::all() {
                store.delete(&key).await?;
            }
            tracing::info!("Store reset");
            output::print_success("Store reset");
        }
        StoreCommand::Flush => {
            session.close().await?;
            output::print_success("All collections written");
        }
    }

    Ok(())
}
