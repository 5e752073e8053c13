use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use taxline::config::Config;
use taxline::invoices::InvoiceService;
use taxline::ledger::LedgerDocument;
use taxline::scenarios::ScenarioCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taxline")]
#[command(about = "Turn accounting-ledger documents into digital-invoicing items", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a ledger document (JSON) and print the finalized invoice items
    Process {
        /// Path to the ledger document
        path: PathBuf,

        /// Skip tax-authority reference lookups
        #[arg(long)]
        offline: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the scenario catalog
    Scenarios,
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("taxline={}", config.app.log_level).into());

    // Logs go to stderr so stdout stays machine-readable
    if config.app.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    init_tracing(&config);

    tracing::debug!("Environment: {}", config.app.env);

    match cli.command {
        Commands::Process {
            path,
            offline,
            pretty,
        } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let document: LedgerDocument = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid ledger document in {}", path.display()))?;

            let service = InvoiceService::from_config(&config, offline)?;
            let processed = service.process_document(&document).await?;

            let output = if pretty {
                serde_json::to_string_pretty(&processed)?
            } else {
                serde_json::to_string(&processed)?
            };
            println!("{}", output);
        }
        Commands::Scenarios => {
            let catalog = ScenarioCatalog::load(config.engine.scenario_catalog_path.as_deref())?;
            for definition in catalog.definitions() {
                let code = match &definition.unregistered_code {
                    Some(unregistered) => format!("{}/{}", definition.scenario_code, unregistered),
                    None => definition.scenario_code.clone(),
                };
                println!(
                    "{:<11} {:<9} {}",
                    code,
                    if definition.requires_reference { "ref" } else { "-" },
                    definition.sale_type,
                );
            }
        }
    }

    Ok(())
}
