//! StakeKit payload types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A token as described by StakeKit. Native assets carry no address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Token {
    pub network: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
    #[serde(rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

/// Entry of `GET v1/tokens`: an input token and the yields it can enter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnabledToken {
    pub token: Token,
    pub available_yields: Vec<String>,
}

/// One address/token pair of a balance query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addresses {
    pub address: String,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
}

/// Entry of `POST v1/tokens/balances`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenBalance {
    pub token: Token,
    pub amount: String,
    pub available_yields: Vec<String>,
}

/// Errors that can occur while talking to StakeKit.
#[derive(Debug, Error)]
pub enum StakeKitError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("Invalid JSON from {url} (status {status}): {source}")]
    InvalidJson {
        url: String,
        status: u16,
        source: serde_json::Error,
    },

    /// JSON did not have the shape a typed helper expects.
    #[error("Unexpected {endpoint} payload: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    /// The configured base URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for StakeKit operations.
pub type StakeKitResult<T> = Result<T, StakeKitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enabled_token_from_api_shape() {
        let entry: EnabledToken = serde_json::from_value(json!({
            "token": {
                "name": "Arbitrum",
                "symbol": "ARB",
                "decimals": 18,
                "network": "arbitrum",
                "address": "0x912CE59144191C1204E64559FE8253a0e49E6548",
                "logoURI": "https://assets.stakek.it/tokens/arb.svg"
            },
            "availableYields": [
                "arbitrum-arb-aave-v3-lending",
                "arbitrum-arb-farb-0xbe3860fd4c3facdf8ad57aa8c1a36d6dc4390a49-4626-vault"
            ]
        }))
        .unwrap();

        assert_eq!(entry.token.symbol, "ARB");
        assert_eq!(entry.token.decimals, 18);
        assert_eq!(
            entry.token.logo_uri.as_deref(),
            Some("https://assets.stakek.it/tokens/arb.svg")
        );
        assert_eq!(entry.available_yields.len(), 2);
    }

    #[test]
    fn test_native_token_has_no_address() {
        let entry: EnabledToken = serde_json::from_value(json!({
            "token": { "name": "Ethereum", "symbol": "ETH", "decimals": 18, "network": "arbitrum" }
        }))
        .unwrap();
        assert!(entry.token.address.is_none());
        assert!(entry.available_yields.is_empty());
    }

    #[test]
    fn test_addresses_wire_format() {
        let with_token = Addresses {
            address: "0xabc".into(),
            network: "arbitrum".into(),
            token_address: Some("0xdef".into()),
        };
        assert_eq!(
            serde_json::to_value(&with_token).unwrap(),
            json!({ "address": "0xabc", "network": "arbitrum", "tokenAddress": "0xdef" })
        );

        let native = Addresses {
            token_address: None,
            ..with_token
        };
        assert_eq!(
            serde_json::to_value(&native).unwrap(),
            json!({ "address": "0xabc", "network": "arbitrum" })
        );
    }

    #[test]
    fn test_error_display() {
        let err = StakeKitError::InvalidUrl(url::ParseError::EmptyHost);
        assert_eq!(err.to_string(), "Invalid URL: empty host");
    }
}
