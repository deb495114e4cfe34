//! Optional EVM wallet.
//!
//! # Data Flow
//! ```text
//! EVM_PRIVATE_KEY setting
//!     → signer.rs (key parsing, address)
//!     → provider.rs (RPC balance, host-facing description)
//! ```
//!
//! The analyst never signs anything; the wallet is only described to the host.

pub mod provider;
pub mod signer;

pub use provider::WalletProvider;
pub use signer::{Wallet, WalletError, PRIVATE_KEY_SETTING};
