//! Metrics collection and exposition.
//!
//! # Metrics
//! - `stake_analyst_queue_depth` (gauge): pending jobs in the serial queue
//! - `stake_analyst_queue_jobs_total` (counter): jobs completed
//! - `stake_analyst_queue_retries_total` (counter): failed attempts put back at the head
//! - `stake_analyst_queue_panics_total` (counter): jobs dropped because they panicked
//! - `stake_analyst_passes_total` (counter): analysis passes by outcome
//! - `stake_analyst_yield_lookups_total` (counter): yield lookups by outcome
//! - `stake_analyst_api_requests_total` (counter): StakeKit calls by method and status
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(%addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_queue_depth(depth: usize) {
    gauge!("stake_analyst_queue_depth").set(depth as f64);
}

pub fn record_job_completed() {
    counter!("stake_analyst_queue_jobs_total").increment(1);
}

pub fn record_job_retry() {
    counter!("stake_analyst_queue_retries_total").increment(1);
}

pub fn record_job_panicked() {
    counter!("stake_analyst_queue_panics_total").increment(1);
}

/// `outcome` is `ok` or `error`.
pub fn record_pass(outcome: &'static str) {
    counter!("stake_analyst_passes_total", "outcome" => outcome).increment(1);
}

pub fn record_yield_lookup(outcome: &'static str) {
    counter!("stake_analyst_yield_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_api_request(method: &str, status: u16) {
    counter!(
        "stake_analyst_api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
