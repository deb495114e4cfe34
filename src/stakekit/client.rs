//! StakeKit HTTP client.
//!
//! # Responsibilities
//! - Execute [`Route`]s with reqwest
//! - Parse every response as JSON, without schema validation
//! - Offer typed helpers for the calls the analyst makes

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::StakeKitConfig;
use crate::observability::metrics;
use crate::stakekit::routes::{Route, Routes};
use crate::stakekit::types::{
    Addresses, EnabledToken, StakeKitError, StakeKitResult, TokenBalance,
};

/// StakeKit API client bound to one network.
#[derive(Clone)]
pub struct StakeKitClient {
    http: reqwest::Client,
    routes: Routes,
    network: String,
}

impl StakeKitClient {
    /// Create a client from configuration. The API key must already be resolved.
    pub fn new(config: &StakeKitConfig) -> StakeKitResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            routes: Routes::new(&config.base_url, config.api_key.clone())?,
            network: config.network.clone(),
        })
    }

    /// Route builders for this client's base URL and key.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Execute a route and return the parsed JSON body.
    ///
    /// Non-success statuses are logged but their bodies are still returned, so
    /// API error objects reach the caller as-is. A body that is not JSON fails.
    pub async fn send(&self, route: Route) -> StakeKitResult<Value> {
        let mut request = self.http.request(route.method.clone(), route.url.clone());
        for (name, value) in &route.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = &route.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        metrics::record_api_request(route.method.as_str(), status.as_u16());

        if !status.is_success() {
            tracing::warn!(
                method = %route.method,
                url = %route.url,
                status = status.as_u16(),
                "StakeKit returned non-success status"
            );
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| StakeKitError::InvalidJson {
            url: route.url.to_string(),
            status: status.as_u16(),
            source,
        })
    }

    async fn send_typed<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        route: Route,
    ) -> StakeKitResult<T> {
        let value = self.send(route).await?;
        serde_json::from_value(value).map_err(|source| StakeKitError::Decode { endpoint, source })
    }

    /// Input tokens of enabled yields on this client's network.
    pub async fn get_enabled_tokens(&self) -> StakeKitResult<Vec<EnabledToken>> {
        let route = self.routes.get_enabled_tokens(&self.network)?;
        self.send_typed("enabled tokens", route).await
    }

    /// Balances for the given address/token pairs.
    pub async fn get_token_balances(
        &self,
        addresses: &[Addresses],
    ) -> StakeKitResult<Vec<TokenBalance>> {
        let route = self.routes.get_token_balances(addresses)?;
        self.send_typed("token balances", route).await
    }

    /// Yield detail, passed through untouched.
    pub async fn get_yield_by_id(&self, yield_id: &str) -> StakeKitResult<Value> {
        let route = self.routes.get_yield_by_id(yield_id)?;
        self.send(route).await
    }
}

impl std::fmt::Debug for StakeKitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StakeKitClient")
            .field("base_url", &self.routes.base().as_str())
            .field("network", &self.network)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StakeKitConfig {
        StakeKitConfig {
            api_key: "secret-key".to_string(),
            ..StakeKitConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = StakeKitClient::new(&test_config()).unwrap();
        assert_eq!(client.network(), "arbitrum");
        assert_eq!(client.routes().base().as_str(), "https://api.stakek.it/");
    }

    #[test]
    fn test_debug_hides_key() {
        let client = StakeKitClient::new(&test_config()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = StakeKitConfig {
            base_url: "::not a url::".to_string(),
            ..test_config()
        };
        assert!(matches!(
            StakeKitClient::new(&config),
            Err(StakeKitError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let config = StakeKitConfig {
            base_url: "http://127.0.0.1:1/".to_string(),
            ..test_config()
        };
        let client = StakeKitClient::new(&config).unwrap();
        let result = client.get_yield_by_id("x").await;
        assert!(matches!(result, Err(StakeKitError::Http(_))));
    }
}
