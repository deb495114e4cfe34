//! Per-chain token allow-list.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Chain -> lower-cased token addresses eligible for analysis.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    chains: HashMap<String, HashSet<String>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config entries (`chain -> [address, ...]`).
    pub fn from_entries(entries: &BTreeMap<String, Vec<String>>) -> Self {
        let mut list = Self::new();
        for (chain, tokens) in entries {
            for token in tokens {
                list.allow(chain, token);
            }
        }
        list
    }

    /// Register `token` under `chain`. Case is ignored.
    pub fn allow(&mut self, chain: &str, token: &str) {
        self.chains
            .entry(chain.to_string())
            .or_default()
            .insert(token.to_lowercase());
    }

    /// Whether `token` may be analysed on `chain`.
    ///
    /// A missing address (native asset) is always allowed, even on chains the
    /// list knows nothing about. Unknown chains reject every explicit address.
    pub fn is_allowed(&self, chain: &str, token: Option<&str>) -> bool {
        tracing::trace!(chain, token, "isAllowedToken");
        let Some(token) = token else {
            return true;
        };
        self.chains
            .get(chain)
            .is_some_and(|tokens| tokens.contains(&token.to_lowercase()))
    }

    pub fn is_empty(&self) -> bool {
        self.chains.values().all(HashSet::is_empty)
    }
}
