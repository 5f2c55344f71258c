//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define probe metrics (request count, latency)
//! - Expose Prometheus-compatible metrics endpoint on its own address
//!
//! # Metrics
//! - `sleepy_requests_total` (counter): requests by method, route, status
//! - `sleepy_request_duration_seconds` (histogram): handling time by route
//!
//! # Design Decisions
//! - Without an installed exporter every record call is a no-op
//! - The exporter never shares a listener with the probe routes

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Route label for requests that reached no registered route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one handled request.
pub fn record_request(method: &str, route: &str, status: u16, elapsed: Duration) {
    metrics::counter!(
        "sleepy_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "sleepy_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(elapsed.as_secs_f64());
}
