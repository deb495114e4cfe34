//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require a non-empty StakeKit API key
//! - Validate URLs, addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AnalystConfig → Result<(), Vec<ValidationError>>
//! - Runs after the API key has been resolved from settings/env

use std::fmt;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::{AnalystConfig, STAKE_KIT_API_KEY};

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully resolved configuration.
pub fn validate_config(config: &AnalystConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.stakekit.api_key.trim().is_empty() {
        errors.push(ValidationError::new(
            STAKE_KIT_API_KEY,
            "StakeKit API key is required",
        ));
    }

    match url::Url::parse(&config.stakekit.base_url) {
        Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError::new(
            "stakekit.base_url",
            "must be a base URL",
        )),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new(
            "stakekit.base_url",
            format!("invalid URL: {}", e),
        )),
    }

    if config.stakekit.network.is_empty() {
        errors.push(ValidationError::new("stakekit.network", "must not be empty"));
    }

    if config.analyst.interval_ms == 0 {
        errors.push(ValidationError::new(
            "analyst.interval_ms",
            "must be greater than zero",
        ));
    }

    if config.analyst.wallet_address.parse::<Address>().is_err() {
        errors.push(ValidationError::new(
            "analyst.wallet_address",
            format!("'{}' is not a valid EVM address", config.analyst.wallet_address),
        ));
    }

    if config.queue.min_delay_ms > config.queue.max_delay_ms {
        errors.push(ValidationError::new(
            "queue.min_delay_ms",
            "must not exceed queue.max_delay_ms",
        ));
    }

    for (chain, tokens) in &config.allow_list {
        if tokens.iter().any(|t| t.trim().is_empty()) {
            errors.push(ValidationError::new(
                format!("allow_list.{}", chain),
                "token addresses must not be empty",
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "invalid socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
