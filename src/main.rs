//! StakeKit yield analyst (v1)
//!
//! Polls the StakeKit API for enabled tokens, keeps the allow-listed ones,
//! fetches the wallet's balances and the details of every yield each balance
//! can enter.
//!
//! # Architecture Overview
//!
//! ```text
//!   PollingScheduler ──tick──▶ Analyst::run_pass
//!                                   │
//!                                   ▼
//!                      ┌──────────────────────────┐
//!                      │ StakeKitClient (reqwest) │──────▶ api.stakek.it
//!                      └────────────┬─────────────┘
//!                                   │ tokens → AllowList → balances → yields
//!                                   ▼                          │
//!                              PassReport            RequestQueue (optional,
//!                                   │                serial with retry)
//!                                   ▼
//!                          EventBus / tracing / metrics
//! ```
//!
//! # Commands
//! - `run`: start polling and wait for Ctrl-C or SIGTERM
//! - `once`: run a single pass and print the report as JSON

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use stake_analyst::analyst::{Analyst, StakingClient};
use stake_analyst::config::{
    load_config, resolve_config, AnalystConfig, EnvFallback, StaticSettings,
};
use stake_analyst::lifecycle::signals::shutdown_signal;
use stake_analyst::lifecycle::{EventBus, SmithClient};
use stake_analyst::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "stake-analyst")]
#[command(about = "Periodic StakeKit yield analysis", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling until interrupted
    Run,
    /// Run one analysis pass and print the report
    Once,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AnalystConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("stake-analyst v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let runtime = EnvFallback::new(StaticSettings::new(config.settings.clone()));

    match cli.command {
        Commands::Run => {
            let manager = SmithClient::start(&runtime, config).await?;
            tracing::info!(
                wallet = manager.client.wallet_address(),
                "Analyst running, press Ctrl-C to stop"
            );

            shutdown_signal().await;
            SmithClient::stop(&runtime).await;
        }
        Commands::Once => {
            let config = resolve_config(config, &runtime)?;
            let mut client = StakingClient::new(config, EventBus::default())?;
            client.init();

            let report = Analyst::new(Arc::new(client)).analyze().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
