// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    COMMENT_REQUESTS,
    ADAPTER_CALLS,
    ADAPTER_DURATION,
    LOG_EVENTS,
};

fn outcome(success: bool) -> &'static str {
    if success { "ok" } else { "failed" }
}

/// Helper to record the logical outcome of a comment API request
pub fn record_request(operation: &str, success: bool) {
    COMMENT_REQUESTS
        .with_label_values(&[operation, outcome(success)])
        .inc();
}

/// Helper to record database adapter call metrics
pub fn record_adapter_call(operation: &str, success: bool, duration_secs: f64) {
    ADAPTER_CALLS
        .with_label_values(&[operation, outcome(success)])
        .inc();

    ADAPTER_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Helper to record audit event delivery
pub fn record_log_event(delivered: bool) {
    let result = if delivered { "sent" } else { "failed" };
    LOG_EVENTS.with_label_values(&[result]).inc();
}
