//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirects_total` (counter): redirects served, by namespace
//! - `fallthrough_total` (counter): requests handled by the catch-all
//! - `mapping_loads_total` (counter): source loads, by format
//! - `mapping_entries` (gauge): entry count per format after load
//! - `registrations_total` (counter): runtime registrations accepted

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a redirect served from a namespace mapping.
pub fn record_redirect(namespace: &str) {
    counter!("redirects_total", "namespace" => namespace.to_string()).increment(1);
}

/// Record a request that fell through to the catch-all.
pub fn record_fallthrough() {
    counter!("fallthrough_total").increment(1);
}

/// Record a mapping load for a format.
pub fn record_load(format: &str, entries: usize) {
    counter!("mapping_loads_total", "format" => format.to_string()).increment(1);
    gauge!("mapping_entries", "format" => format.to_string()).set(entries as f64);
}

/// Record an accepted runtime registration.
pub fn record_registration() {
    counter!("registrations_total").increment(1);
}
