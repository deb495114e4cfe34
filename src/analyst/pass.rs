//! The analysis pass.
//!
//! # Data Flow
//! ```text
//! get_enabled_tokens(network)
//!     → keep tokens the allow-list accepts
//!     → get_token_balances(wallet × allowed tokens)
//!     → get_yield_by_id for every yield id of every balance (fan-out)
//!     → PassReport
//! ```
//!
//! # Design Decisions
//! - Yield lookups settle independently: one failure is recorded in the report
//!   and does not abort the pass
//! - Token and balance failures abort the pass; the scheduler logs and retries
//!   on the next tick

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::analyst::client::StakingClient;
use crate::lifecycle::events::ClientEvent;
use crate::observability::metrics;
use crate::scheduler::{PollingScheduler, ScheduleHandle};
use crate::stakekit::{Addresses, StakeKitError, Token, TokenBalance};

/// Errors that abort an analysis pass.
#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("failed to fetch enabled tokens: {0}")]
    EnabledTokens(#[source] StakeKitError),

    #[error("failed to fetch token balances: {0}")]
    Balances(#[source] StakeKitError),
}

/// Outcome of one yield lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    Detail(Value),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldLookup {
    pub yield_id: String,
    #[serde(flatten)]
    pub outcome: LookupOutcome,
}

/// A balance together with the details of the yields it can enter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceYields {
    pub token: Token,
    pub amount: String,
    pub yields: Vec<YieldLookup>,
}

/// Everything one pass learned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    pub pass_id: Uuid,
    pub enabled_tokens: usize,
    pub allowed_tokens: Vec<Token>,
    pub balances: Vec<BalanceYields>,
}

impl PassReport {
    pub fn summary(&self) -> PassSummary {
        let lookups = self.balances.iter().flat_map(|b| &b.yields);
        let (mut total, mut failed) = (0, 0);
        for lookup in lookups {
            total += 1;
            if matches!(lookup.outcome, LookupOutcome::Error(_)) {
                failed += 1;
            }
        }

        PassSummary {
            pass_id: self.pass_id,
            allowed_tokens: self.allowed_tokens.len(),
            balances: self.balances.len(),
            yield_lookups: total,
            failed_lookups: failed,
        }
    }
}

/// Counts carried by [`ClientEvent::PassCompleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub pass_id: Uuid,
    pub allowed_tokens: usize,
    pub balances: usize,
    pub yield_lookups: usize,
    pub failed_lookups: usize,
}

/// Runs analysis passes against the shared client.
#[derive(Debug, Clone)]
pub struct Analyst {
    client: Arc<StakingClient>,
}

impl Analyst {
    pub fn new(client: Arc<StakingClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<StakingClient> {
        &self.client
    }

    /// Start polling: one pass now, then one per configured interval.
    pub fn start(&self) -> ScheduleHandle {
        let interval = Duration::from_millis(self.client.config().analyst.interval_ms);
        let analyst = self.clone();

        tracing::info!(interval_ms = interval.as_millis() as u64, "Analyst started");
        PollingScheduler::new(interval).start(move || {
            let analyst = analyst.clone();
            async move { analyst.run_pass().await.map(|_| ()) }
        })
    }

    /// Run one pass and publish its outcome on the event bus.
    pub async fn run_pass(&self) -> Result<PassReport, AnalystError> {
        let result = self.analyze().await;
        match &result {
            Ok(report) => {
                metrics::record_pass("ok");
                self.client
                    .events()
                    .publish(ClientEvent::PassCompleted(report.summary()));
            }
            Err(e) => {
                metrics::record_pass("error");
                self.client.events().publish(ClientEvent::PassFailed(e.to_string()));
            }
        }
        result
    }

    /// Run one analysis pass.
    pub async fn analyze(&self) -> Result<PassReport, AnalystError> {
        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!("analysis_pass", %pass_id);
        self.analyze_inner(pass_id).instrument(span).await
    }

    async fn analyze_inner(&self, pass_id: Uuid) -> Result<PassReport, AnalystError> {
        let stakekit = self.client.stakekit();
        let network = stakekit.network();

        let enabled = stakekit
            .get_enabled_tokens()
            .await
            .map_err(AnalystError::EnabledTokens)?;
        let enabled_tokens = enabled.len();

        let allowed_tokens: Vec<Token> = enabled
            .into_iter()
            .map(|entry| entry.token)
            .filter(|token| self.client.is_allowed_token(network, token.address.as_deref()))
            .collect();
        tracing::info!(
            enabled = enabled_tokens,
            allowed = allowed_tokens.len(),
            "Enabled tokens"
        );

        let addresses: Vec<Addresses> = allowed_tokens
            .iter()
            .map(|token| Addresses {
                address: self.client.wallet_address().to_string(),
                network: network.to_string(),
                token_address: token.address.clone(),
            })
            .collect();
        tracing::debug!(?addresses, "Token addresses");

        let balances = stakekit
            .get_token_balances(&addresses)
            .await
            .map_err(AnalystError::Balances)?;
        tracing::info!(count = balances.len(), "Token balances");

        let balances = join_all(
            balances
                .into_iter()
                .map(|balance| self.lookup_balance(balance)),
        )
        .await;

        let report = PassReport {
            pass_id,
            enabled_tokens,
            allowed_tokens,
            balances,
        };
        let summary = report.summary();
        tracing::info!(
            balances = summary.balances,
            yield_lookups = summary.yield_lookups,
            failed_lookups = summary.failed_lookups,
            "Yields"
        );
        Ok(report)
    }

    async fn lookup_balance(&self, balance: TokenBalance) -> BalanceYields {
        let yields = if self.client.config().analyst.serialize_yield_lookups {
            self.lookup_serialized(&balance.available_yields).await
        } else {
            self.lookup_concurrent(&balance.available_yields).await
        };

        BalanceYields {
            token: balance.token,
            amount: balance.amount,
            yields,
        }
    }

    async fn lookup_concurrent(&self, yield_ids: &[String]) -> Vec<YieldLookup> {
        let stakekit = self.client.stakekit();
        join_all(yield_ids.iter().map(|yield_id| async move {
            let outcome = stakekit.get_yield_by_id(yield_id).await.map_err(|e| e.to_string());
            record_lookup(yield_id, outcome)
        }))
        .await
    }

    /// Lookups go through the request queue, which retries failures until
    /// they succeed. A handle only errors if the queue is torn down.
    async fn lookup_serialized(&self, yield_ids: &[String]) -> Vec<YieldLookup> {
        let handles: Vec<_> = yield_ids
            .iter()
            .map(|yield_id| {
                let stakekit = self.client.stakekit().clone();
                let id = yield_id.clone();
                let handle = self.client.queue().submit(move || {
                    let stakekit = stakekit.clone();
                    let id = id.clone();
                    async move { stakekit.get_yield_by_id(&id).await }
                });
                async move { record_lookup(yield_id, handle.await.map_err(|e| e.to_string())) }
            })
            .collect();

        join_all(handles).await
    }
}

fn record_lookup(yield_id: &str, outcome: Result<Value, String>) -> YieldLookup {
    let outcome = match outcome {
        Ok(detail) => {
            metrics::record_yield_lookup("ok");
            LookupOutcome::Detail(detail)
        }
        Err(e) => {
            metrics::record_yield_lookup("error");
            tracing::warn!(yield_id, error = %e, "Yield lookup failed");
            LookupOutcome::Error(e)
        }
    };

    YieldLookup {
        yield_id: yield_id.to_string(),
        outcome,
    }
}
