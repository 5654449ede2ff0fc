//! Metrics implementation using Prometheus.

use frontier_core::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .map_err(|e| Error::config(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}

/// Helper to track HTTP request metrics (latency, count).
pub fn track_request(method: &str, path: &str, status: u16, latency_sec: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(latency_sec);
}

/// Helper to track routing decisions per model and outcome.
pub fn track_route_decision(model_id: &str, outcome: &str) {
    metrics::counter!(
        "routing_decisions_total",
        "model" => model_id.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Helper to track frontier snapshot refreshes.
pub fn track_refresh(records: usize, elapsed_ms: u64) {
    metrics::counter!("frontier_refreshes_total").increment(1);
    metrics::gauge!("frontier_records").set(records as f64);
    metrics::histogram!("frontier_refresh_duration_ms").record(elapsed_ms as f64);
}
