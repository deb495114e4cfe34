//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → settings.rs (host runtime lookup, env fallback)
//!     → validation.rs (semantic checks, all failures reported together)
//!     → AnalystConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::AnalystConfig;
pub use schema::{AnalysisConfig, QueueConfig, StakeKitConfig, WalletConfig};
pub use settings::{AgentRuntime, EnvFallback, StaticSettings};
