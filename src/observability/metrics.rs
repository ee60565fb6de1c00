//! Metrics collection and exposition.
//!
//! # Metrics
//! - `poller_ticks_total` (counter): ticks fired
//! - `poller_requests_total` (counter): request outcomes by `outcome` label
//! - `poller_response_bytes_total` (counter): body bytes written to the sink
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::poller::types::TickOutcome;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime. Failure is logged, not fatal.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_tick() {
    counter!("poller_ticks_total").increment(1);
}

pub fn record_outcome(outcome: &TickOutcome) {
    counter!("poller_requests_total", "outcome" => outcome.label()).increment(1);
}

pub fn record_response_bytes(len: usize) {
    counter!("poller_response_bytes_total").increment(len as u64);
}
