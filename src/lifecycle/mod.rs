//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve settings → Validate → Build client → Load allow-list → Ready → Poll
//!
//! Events (events.rs):
//!     Ready, PassCompleted, PassFailed → broadcast to subscribers
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → binary calls SmithClient::stop and exits
//! ```
//!
//! # Design Decisions
//! - Startup is ordered and fails fast
//! - No graceful teardown: stop only logs, the process exit ends the loop

pub mod events;
pub mod signals;
pub mod startup;

pub use events::{ClientEvent, EventBus};
pub use startup::{SmithClient, SmithManager, StartupError};
