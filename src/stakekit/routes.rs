//! StakeKit route table.
//!
//! Every API operation is a fixed `(method, url, headers, body)` tuple built
//! from the base URL, the API key and endpoint-specific parameters. Nothing here
//! performs I/O; see [`StakeKitClient::send`](crate::stakekit::StakeKitClient::send).

use reqwest::Method;
use serde_json::{json, Value};
use url::Url;

use crate::stakekit::types::{Addresses, StakeKitResult, Token};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// A ready-to-send request description.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Route {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds [`Route`]s against one base URL with one API key.
#[derive(Clone)]
pub struct Routes {
    base: Url,
    api_key: String,
}

impl Routes {
    /// `base_url` should end with `/`; one is appended if missing.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> StakeKitResult<Self> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithoutBase.into());
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Each entry of `segments` becomes exactly one path segment: `/`, `?`
    /// and `#` inside caller-supplied ids are percent-encoded, never
    /// interpreted.
    fn route(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> StakeKitResult<Route> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithoutBase)?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(Route {
            method,
            url,
            headers: vec![
                ("accept", "application/json".to_string()),
                (API_KEY_HEADER, self.api_key.clone()),
                ("content-type", "application/json".to_string()),
            ],
            body,
        })
    }

    fn get(&self, segments: &[&str]) -> StakeKitResult<Route> {
        self.route(Method::GET, segments, &[], None)
    }

    fn post(&self, segments: &[&str], body: Value) -> StakeKitResult<Route> {
        self.route(Method::POST, segments, &[], Some(body))
    }

    // Actions

    /// Action and its associated transactions.
    pub fn get_action(&self, action_id: &str) -> StakeKitResult<Route> {
        self.get(&["v1", "actions", action_id])
    }

    pub fn get_estimated_gas_for_action(&self, action_id: &str) -> StakeKitResult<Route> {
        self.get(&["v1", "actions", action_id, "gas-estimate"])
    }

    /// Create an action to enter a yield bearing position.
    pub fn create_enter_action(
        &self,
        integration_id: &str,
        address: &str,
        amount: &str,
        input_token: Option<&Token>,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "actions", "enter"],
            action_body(integration_id, address, amount, input_token),
        )
    }

    /// Create an action to exit a yield bearing position.
    pub fn create_exit_action(
        &self,
        integration_id: &str,
        address: &str,
        amount: &str,
        input_token: Option<&Token>,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "actions", "exit"],
            action_body(integration_id, address, amount, input_token),
        )
    }

    pub fn estimate_gas_for_enter_action(
        &self,
        integration_id: &str,
        address: &str,
        amount: &str,
        input_token: Option<&Token>,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "actions", "enter", "estimate-gas"],
            action_body(integration_id, address, amount, input_token),
        )
    }

    pub fn estimate_gas_for_exit_action(
        &self,
        integration_id: &str,
        address: &str,
        amount: &str,
        input_token: Option<&Token>,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "actions", "exit", "estimate-gas"],
            action_body(integration_id, address, amount, input_token),
        )
    }

    // Transactions

    pub fn get_transaction(&self, transaction_id: &str) -> StakeKitResult<Route> {
        self.get(&["v1", "transactions", transaction_id])
    }

    pub fn get_transaction_status_by_id(&self, transaction_id: &str) -> StakeKitResult<Route> {
        self.get(&["v1", "transactions", transaction_id, "status"])
    }

    pub fn get_transaction_status_by_hash(
        &self,
        network: &str,
        hash: &str,
    ) -> StakeKitResult<Route> {
        self.get(&["v1", "transactions", "status", network, hash])
    }

    /// Construct the unsigned transaction.
    pub fn construct_transaction(&self, transaction_id: &str) -> StakeKitResult<Route> {
        self.route(
            Method::PATCH,
            &["v1", "transactions", transaction_id],
            &[],
            None,
        )
    }

    /// Submit a signed transaction for broadcasting.
    pub fn submit_transaction(
        &self,
        transaction_id: &str,
        signed_transaction: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "transactions", transaction_id, "submit"],
            json!({ "signedTransaction": signed_transaction }),
        )
    }

    /// Report the hash of a transaction broadcast elsewhere.
    pub fn submit_transaction_hash(
        &self,
        transaction_id: &str,
        hash: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "transactions", transaction_id, "submit_hash"],
            json!({ "hash": hash }),
        )
    }

    pub fn get_transaction_verification(
        &self,
        network: &str,
        address: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "transactions", "verification", network],
            json!({ "addresses": { "address": address } }),
        )
    }

    pub fn get_current_gas_params(&self, network: &str) -> StakeKitResult<Route> {
        self.get(&["v1", "transactions", "gas", network])
    }

    // Tokens

    /// Input tokens of enabled yields.
    pub fn get_enabled_tokens(&self, network: &str) -> StakeKitResult<Route> {
        self.route(Method::GET, &["v1", "tokens"], &[("network", network)], None)
    }

    /// Prices for `tokens`; `currency` defaults to `usd`.
    pub fn get_token_prices(
        &self,
        tokens: &[Token],
        currency: Option<&str>,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "tokens", "prices"],
            json!({ "tokenList": tokens, "currency": currency.unwrap_or("usd") }),
        )
    }

    pub fn get_token_balances(&self, addresses: &[Addresses]) -> StakeKitResult<Route> {
        self.post(&["v1", "tokens", "balances"], json!({ "addresses": addresses }))
    }

    // Yields

    pub fn get_yield_balances(
        &self,
        addresses: &[Addresses],
        integration_id: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "yields", "balances"],
            json!({ "addresses": addresses, "integrationId": integration_id }),
        )
    }

    /// Enabled yields with configuration and metadata; `limit` defaults to 100.
    pub fn get_enabled_yields(&self, network: &str, limit: Option<u32>) -> StakeKitResult<Route> {
        let limit = limit.unwrap_or(100).to_string();
        self.route(
            Method::GET,
            &["v1", "yields", "enabled"],
            &[("network", network), ("limit", limit.as_str())],
            None,
        )
    }

    pub fn get_enabled_networks(&self) -> StakeKitResult<Route> {
        self.get(&["v1", "yields", "enabled", "networks"])
    }

    pub fn get_single_yield_balances(
        &self,
        integration_id: &str,
        address: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "yields", integration_id, "balances"],
            json!({ "addresses": { "address": address } }),
        )
    }

    pub fn get_yield_historic_rewards_summary(
        &self,
        integration_id: &str,
        address: &str,
    ) -> StakeKitResult<Route> {
        self.post(
            &["v1", "yields", integration_id, "rewards-summary"],
            json!({ "addresses": { "address": address } }),
        )
    }

    pub fn get_yield_by_id(&self, yield_id: &str) -> StakeKitResult<Route> {
        self.get(&["v2", "yields", yield_id])
    }

    pub fn get_yield_validators(&self, yield_id: &str) -> StakeKitResult<Route> {
        self.get(&["v2", "yields", yield_id, "validators"])
    }
}

impl std::fmt::Debug for Routes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Routes")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

fn action_body(
    integration_id: &str,
    address: &str,
    amount: &str,
    input_token: Option<&Token>,
) -> Value {
    let mut args = json!({ "amount": amount });
    if let Some(token) = input_token {
        args["inputToken"] = json!(token);
    }
    json!({
        "addresses": { "address": address },
        "integrationId": integration_id,
        "args": args,
    })
}
