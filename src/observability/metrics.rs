//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cms_requests_total` (counter): requests by outcome and manager
//! - `cms_request_duration_seconds` (histogram): page handling latency
//! - `cms_snapshots_published_total` (counter): pages copied to snapshots
//!
//! Recording is a no-op until a recorder is installed, so tests never need one.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a CMS request.
///
/// `outcome` is one of `page`, `not_found`, `internal` or `other`.
pub fn record_request(outcome: &'static str, manager: &'static str, start: Instant) {
    counter!("cms_requests_total", "outcome" => outcome, "manager" => manager).increment(1);
    histogram!("cms_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_snapshots_published(count: usize) {
    counter!("cms_snapshots_published_total").increment(count as u64);
}
