//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hook_requests_total` (counter): deliveries received
//! - `hook_events_ignored_total` (counter): non-push events dropped
//! - `hook_payload_rejected_total` (counter): bodies that failed to parse
//! - `hook_secret_mismatch_total` (counter): rules skipped over a bad secret
//! - `hook_commands_total` (counter, label `outcome`): commands executed
//! - `config_reloads_total` (counter, label `outcome`): reload attempts

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and start the scrape endpoint.
///
/// Failure is logged, not fatal; the service runs without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("hook_requests_total", "Webhook deliveries received.");
            describe_counter!("hook_events_ignored_total", "Non-push events dropped.");
            describe_counter!(
                "hook_payload_rejected_total",
                "Deliveries whose body failed to parse."
            );
            describe_counter!(
                "hook_secret_mismatch_total",
                "Rules skipped because the delivery secret did not match."
            );
            describe_counter!("hook_commands_total", "Commands executed, by outcome.");
            describe_counter!("config_reloads_total", "Configuration reload attempts, by outcome.");
            tracing::info!(address = %addr, "metrics endpoint started");
        }
        Err(e) => tracing::error!(error = %e, "failed to start metrics endpoint"),
    }
}

pub fn record_request() {
    counter!("hook_requests_total").increment(1);
}

pub fn record_ignored_event() {
    counter!("hook_events_ignored_total").increment(1);
}

pub fn record_rejected_payload() {
    counter!("hook_payload_rejected_total").increment(1);
}

pub fn record_secret_mismatch() {
    counter!("hook_secret_mismatch_total").increment(1);
}

pub fn record_command(outcome: &'static str) {
    counter!("hook_commands_total", "outcome" => outcome).increment(1);
}

pub fn record_reload(outcome: &'static str) {
    counter!("config_reloads_total", "outcome" => outcome).increment(1);
}
