//! EVM key loading.
//!
//! # Security
//! - The private key comes only from the `EVM_PRIVATE_KEY` setting
//! - Keys are never logged or serialized

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use thiserror::Error;

use crate::config::AgentRuntime;

/// Setting that holds the hex-encoded private key.
pub const PRIVATE_KEY_SETTING: &str = "EVM_PRIVATE_KEY";

/// Errors from wallet setup and balance queries.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("RPC error: {0}")]
    Rpc(String),
}

/// A local signing key bound to a chain.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl Wallet {
    /// Parse a hex private key, with or without `0x`.
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> Result<Self, WalletError> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let mut signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("{}", e)))?;
        signer.set_chain_id(Some(chain_id));

        tracing::info!(address = %signer.address(), chain_id, "Wallet initialized");

        Ok(Self { signer, chain_id })
    }

    /// Load the key from host settings.
    ///
    /// Returns `Ok(None)` when the setting is absent or blank: the wallet is
    /// optional and the client runs without it.
    pub fn from_runtime(
        runtime: &dyn AgentRuntime,
        chain_id: u64,
    ) -> Result<Option<Self>, WalletError> {
        match runtime.get_setting(PRIVATE_KEY_SETTING) {
            Some(key) if !key.trim().is_empty() => Self::from_private_key(&key, chain_id).map(Some),
            _ => Ok(None),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticSettings;

    // Anvil's first account
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 42161).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
        assert_eq!(wallet.chain_id(), 42161);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), 1).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        let err = Wallet::from_private_key("invalid_key", 1).unwrap_err();
        assert!(err.to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_from_runtime() {
        let empty = StaticSettings::default();
        assert!(Wallet::from_runtime(&empty, 1).unwrap().is_none());

        let blank = StaticSettings::default().with(PRIVATE_KEY_SETTING, "  ");
        assert!(Wallet::from_runtime(&blank, 1).unwrap().is_none());

        let set = StaticSettings::default().with(PRIVATE_KEY_SETTING, TEST_PRIVATE_KEY);
        let wallet = Wallet::from_runtime(&set, 1).unwrap().unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);

        let bad = StaticSettings::default().with(PRIVATE_KEY_SETTING, "nope");
        assert!(Wallet::from_runtime(&bad, 1).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
    }
}
