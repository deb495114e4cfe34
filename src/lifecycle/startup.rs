//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve and validate configuration against host settings
//! - Build the shared client, load the allow-list, set up the optional wallet
//! - Start the polling loop and hand the host a manager handle
//!
//! # Design Decisions
//! - Fail fast: configuration and client construction errors are fatal
//! - A missing or unreachable wallet is not an error
//! - `Ready` is published before the first pass starts

use std::sync::Arc;

use thiserror::Error;

use crate::analyst::{Analyst, StakingClient};
use crate::config::{resolve_config, AgentRuntime, AnalystConfig, ConfigError};
use crate::lifecycle::events::{ClientEvent, EventBus};
use crate::scheduler::ScheduleHandle;
use crate::stakekit::StakeKitError;
use crate::wallet::{Wallet, WalletError, WalletProvider};

/// Errors that prevent the client from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build StakeKit client: {0}")]
    StakeKit(#[from] StakeKitError),

    #[error("failed to set up wallet: {0}")]
    Wallet(#[from] WalletError),
}

/// Host-facing entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmithClient;

impl SmithClient {
    /// Start the client with a fresh event bus.
    pub async fn start(
        runtime: &dyn AgentRuntime,
        config: AnalystConfig,
    ) -> Result<SmithManager, StartupError> {
        Self::start_with_events(runtime, config, EventBus::default()).await
    }

    /// Start the client publishing on `events`, so the caller can subscribe
    /// before `Ready` goes out.
    pub async fn start_with_events(
        runtime: &dyn AgentRuntime,
        config: AnalystConfig,
        events: EventBus,
    ) -> Result<SmithManager, StartupError> {
        let config = resolve_config(config, runtime)?;
        tracing::info!(
            base_url = %config.stakekit.base_url,
            network = %config.stakekit.network,
            "Smith client started"
        );

        let wallet = match Wallet::from_runtime(runtime, config.wallet.chain_id)? {
            Some(wallet) => Some(WalletProvider::new(wallet, &config.wallet)?),
            None => {
                tracing::debug!("No EVM private key configured, running without wallet");
                None
            }
        };
        if let Some(provider) = &wallet {
            if let Some(description) = provider.describe().await {
                tracing::info!("{}", description);
            }
        }

        let mut client = StakingClient::new(config, events.clone())?;
        client.init();
        let client = Arc::new(client);

        let analyst = Analyst::new(client.clone());
        events.publish(ClientEvent::Ready);
        let schedule = analyst.start();

        Ok(SmithManager {
            client,
            analyst,
            schedule,
            wallet,
            events,
        })
    }

    /// Stopping is not supported; the polling loop keeps running.
    pub async fn stop(_runtime: &dyn AgentRuntime) {
        tracing::warn!("Smith client does not support stopping yet");
    }
}

/// Handle to a started client.
#[derive(Debug)]
pub struct SmithManager {
    pub client: Arc<StakingClient>,
    pub analyst: Analyst,
    pub schedule: ScheduleHandle,
    pub wallet: Option<WalletProvider>,
    pub events: EventBus,
}

impl SmithManager {
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}
