//! StakeKit API integration.
//!
//! # Data Flow
//! ```text
//! StakeKitConfig (base URL, network, resolved API key)
//!     → routes.rs (method, URL, headers, JSON body per operation)
//!     → client.rs (reqwest send, JSON parse, typed helpers)
//!     → types.rs (Token, EnabledToken, Addresses, TokenBalance)
//! ```
//!
//! # Constraints
//! - The API key is sent as `X-API-KEY` and never logged
//! - No per-call timeout; pacing is the request queue's job

pub mod client;
pub mod routes;
pub mod types;

pub use client::StakeKitClient;
pub use routes::{Route, Routes};
pub use types::{Addresses, EnabledToken, StakeKitError, StakeKitResult, Token, TokenBalance};
