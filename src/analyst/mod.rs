//! Yield analysis.
//!
//! # Responsibilities
//! - Decide which StakeKit tokens are eligible (allow-list)
//! - Hold the state shared across passes (client)
//! - Run the periodic token → balance → yield pipeline (pass)
//!
//! # Data Flow
//! ```text
//! PollingScheduler tick
//!     → Analyst::run_pass
//!     → StakeKit: enabled tokens → allow-list filter → balances → yield details
//!     → PassReport, ClientEvent::{PassCompleted, PassFailed}
//! ```

pub mod allow_list;
pub mod client;
pub mod pass;

pub use allow_list::AllowList;
pub use client::StakingClient;
pub use pass::{
    Analyst, AnalystError, BalanceYields, LookupOutcome, PassReport, PassSummary, YieldLookup,
};
