//! Wallet description for the host.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Report the wallet address and native balance as text

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::utils::format_ether;
use alloy::primitives::U256;
use alloy::providers::{Provider, ProviderBuilder};
use tokio::time::timeout;

use crate::config::WalletConfig;
use crate::wallet::signer::{Wallet, WalletError};

/// Wallet plus an RPC connection for balance lookups.
#[derive(Clone)]
pub struct WalletProvider {
    wallet: Wallet,
    provider: Arc<dyn Provider + Send + Sync>,
    timeout_duration: Duration,
}

impl WalletProvider {
    pub fn new(wallet: Wallet, config: &WalletConfig) -> Result<Self, WalletError> {
        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e: url::ParseError| {
            WalletError::InvalidRpcUrl {
                url: config.rpc_url.clone(),
                reason: e.to_string(),
            }
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(rpc_url))
            as Arc<dyn Provider + Send + Sync>;

        Ok(Self {
            wallet,
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Native balance of the wallet, in wei.
    pub async fn balance(&self) -> Result<U256, WalletError> {
        let fut = self.provider.get_balance(self.wallet.address());
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(WalletError::Rpc(e.to_string())),
            Err(_) => Err(WalletError::Rpc("balance request timed out".to_string())),
        }
    }

    /// `"EVM Wallet Address: <addr>\nBalance: <eth> ETH"`, or `None` if the
    /// balance cannot be fetched.
    pub async fn describe(&self) -> Option<String> {
        match self.balance().await {
            Ok(balance) => Some(format_description(&self.wallet, balance)),
            Err(e) => {
                tracing::error!(error = %e, "Error in EVM wallet provider");
                None
            }
        }
    }
}

fn format_description(wallet: &Wallet, balance: U256) -> String {
    format!(
        "EVM Wallet Address: {}\nBalance: {} ETH",
        wallet.address(),
        format_ether(balance)
    )
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider")
            .field("wallet", &self.wallet)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
