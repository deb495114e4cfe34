//! StakeKit yield analyst library

pub mod analyst;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod queue;
pub mod scheduler;
pub mod stakekit;
pub mod wallet;

pub use analyst::{Analyst, PassReport, StakingClient};
pub use config::schema::AnalystConfig;
pub use lifecycle::{ClientEvent, EventBus, SmithClient, SmithManager};
pub use queue::RequestQueue;
