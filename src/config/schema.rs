//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the analyst.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the single required setting.
pub const STAKE_KIT_API_KEY: &str = "STAKE_KIT_API_KEY";

/// USDC on Arbitrum One, the only token analysed out of the box.
pub const ARBITRUM_USDC: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";

/// Root configuration for the analyst client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AnalystConfig {
    /// StakeKit API settings.
    pub stakekit: StakeKitConfig,

    /// Analysis pass settings.
    pub analyst: AnalysisConfig,

    /// Serial request queue pacing.
    pub queue: QueueConfig,

    /// Chain -> token addresses eligible for analysis.
    pub allow_list: BTreeMap<String, Vec<String>>,

    /// Wallet provider settings.
    pub wallet: WalletConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static host settings, consulted before the process environment.
    pub settings: BTreeMap<String, String>,
}

impl AnalystConfig {
    /// Allow-list entries, falling back to Arbitrum USDC when none are configured.
    pub fn allow_list_entries(&self) -> BTreeMap<String, Vec<String>> {
        if self.allow_list.is_empty() {
            let mut defaults = BTreeMap::new();
            defaults.insert("arbitrum".to_string(), vec![ARBITRUM_USDC.to_string()]);
            return defaults;
        }
        self.allow_list.clone()
    }
}

/// StakeKit REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StakeKitConfig {
    /// Base URL, including the trailing slash.
    pub base_url: String,

    /// Network queried for enabled tokens and balances.
    pub network: String,

    /// API key. Usually left empty here and resolved from settings or env.
    pub api_key: String,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for StakeKitConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stakek.it/".to_string(),
            network: "arbitrum".to_string(),
            api_key: String::new(),
            connect_timeout_secs: 10,
        }
    }
}

/// Analysis pass configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Delay between the end of one pass and the start of the next.
    pub interval_ms: u64,

    /// Wallet whose balances are analysed.
    pub wallet_address: String,

    /// Route yield lookups through the serial queue instead of fanning out.
    pub serialize_yield_lookups: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interval_ms: 60_000,
            wallet_address: "0xd5B5F9F7987Eeb5069a7DA021029d48AFAA8e817".to_string(),
            serialize_yield_lookups: false,
        }
    }
}

/// Serial request queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Lower bound of the random delay after each job, in milliseconds.
    pub min_delay_ms: u64,

    /// Upper bound of the random delay after each job, in milliseconds.
    pub max_delay_ms: u64,

    /// Backoff unit: a failed job waits `2^depth * backoff_base_ms`.
    pub backoff_base_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1500,
            max_delay_ms: 3500,
            backoff_base_ms: 1000,
        }
    }
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint used for balance lookups.
    pub rpc_url: String,

    /// Chain ID used by the signer.
    pub chain_id: u64,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            chain_id: 42161,
            rpc_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
