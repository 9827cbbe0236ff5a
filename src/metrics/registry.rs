// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Comment API requests by logical outcome (HTTP status is always 200)
    pub static ref COMMENT_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("comment_requests_total", "Total comment API requests"),
        &["operation", "outcome"], // outcome: ok, failed
        REGISTRY
    ).unwrap();

    // ============================================================================
    // ADAPTER METRICS
    // ============================================================================

    /// Database adapter calls
    pub static ref ADAPTER_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("adapter_calls_total", "Total database adapter calls"),
        &["operation", "outcome"],
        REGISTRY
    ).unwrap();

    /// Database adapter call duration
    pub static ref ADAPTER_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("adapter_call_duration_seconds", "Database adapter call duration")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // AUDIT LOG METRICS
    // ============================================================================

    /// Audit events shipped to the logger service
    pub static ref LOG_EVENTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("log_events_total", "Total audit events dispatched to the logger service"),
        &["result"], // result: sent, failed
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
