//! Shared client state.
//!
//! # Responsibilities
//! - Own the resolved configuration, StakeKit client and request queue
//! - Hold the allow-list and answer token eligibility questions
//! - Carry the event bus passes report to

use crate::analyst::allow_list::AllowList;
use crate::config::AnalystConfig;
use crate::lifecycle::events::EventBus;
use crate::queue::RequestQueue;
use crate::stakekit::{StakeKitClient, StakeKitResult};

/// State shared by every component of a running client.
///
/// Built in two steps: [`StakingClient::new`] wires the collaborators, then
/// [`StakingClient::init`] loads the allow-list. Until `init` runs, only tokens
/// without an address pass the allow-list.
#[derive(Debug)]
pub struct StakingClient {
    config: AnalystConfig,
    stakekit: StakeKitClient,
    queue: RequestQueue,
    allow_list: AllowList,
    events: EventBus,
}

impl StakingClient {
    /// `config` must already carry a resolved API key.
    pub fn new(config: AnalystConfig, events: EventBus) -> StakeKitResult<Self> {
        let stakekit = StakeKitClient::new(&config.stakekit)?;
        let queue = RequestQueue::new(config.queue.clone());

        Ok(Self {
            config,
            stakekit,
            queue,
            allow_list: AllowList::new(),
            events,
        })
    }

    /// Load the allow-list from configuration.
    pub fn init(&mut self) {
        let entries = self.config.allow_list_entries();
        self.allow_list = AllowList::from_entries(&entries);
        tracing::info!(
            chains = entries.len(),
            tokens = entries.values().map(Vec::len).sum::<usize>(),
            "Allow-list loaded"
        );
    }

    pub fn is_allowed_token(&self, chain: &str, token: Option<&str>) -> bool {
        self.allow_list.is_allowed(chain, token)
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn stakekit(&self) -> &StakeKitClient {
        &self.stakekit
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn wallet_address(&self) -> &str {
        &self.config.analyst.wallet_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ARBITRUM_USDC;

    fn test_config() -> AnalystConfig {
        let mut config = AnalystConfig::default();
        config.stakekit.api_key = "key".into();
        config
    }

    #[test]
    fn test_allow_list_empty_before_init() {
        let client = StakingClient::new(test_config(), EventBus::default()).unwrap();
        assert!(!client.is_allowed_token("arbitrum", Some(ARBITRUM_USDC)));
        assert!(client.is_allowed_token("arbitrum", None));
    }

    #[test]
    fn test_init_loads_default_allow_list() {
        let mut client = StakingClient::new(test_config(), EventBus::default()).unwrap();
        client.init();
        assert!(client.is_allowed_token(
            "arbitrum",
            Some("0xAF88D065E77C8CC2239327C5EDB3A432268E5831")
        ));
        assert!(!client.is_allowed_token("ethereum", Some(ARBITRUM_USDC)));
    }

    #[test]
    fn test_accessors() {
        let client = StakingClient::new(test_config(), EventBus::default()).unwrap();
        assert_eq!(client.wallet_address(), "0xd5B5F9F7987Eeb5069a7DA021029d48AFAA8e817");
        assert_eq!(client.stakekit().network(), "arbitrum");
        assert!(client.queue().is_empty());
    }
}
