//! Configuration loading from disk and from the host runtime.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AnalystConfig, STAKE_KIT_API_KEY};
use crate::config::settings::AgentRuntime;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Smith configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a TOML configuration file. No semantic validation happens here.
pub fn load_config(path: &Path) -> Result<AnalystConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AnalystConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve host-provided settings into `config` and validate the result.
///
/// The API key comes from the runtime setting when non-empty, otherwise from
/// the process environment, otherwise from the file.
pub fn resolve_config(
    config: AnalystConfig,
    runtime: &dyn AgentRuntime,
) -> Result<AnalystConfig, ConfigError> {
    resolve_with_env(config, runtime, |key| std::env::var(key).ok())
}

fn resolve_with_env<E>(
    mut config: AnalystConfig,
    runtime: &dyn AgentRuntime,
    env: E,
) -> Result<AnalystConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    if let Some(key) = non_empty(runtime.get_setting(STAKE_KIT_API_KEY))
        .or_else(|| non_empty(env(STAKE_KIT_API_KEY)))
    {
        config.stakekit.api_key = key.trim().to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
