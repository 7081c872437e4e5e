//! Metrics collection.
//!
//! # Metrics
//! - `client_requests_total` (counter): completed requests by method, status
//! - `client_request_duration_seconds` (histogram): latency by method
//! - `client_transport_errors_total` (counter): failed sends by method
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the embedding application installs a recorder
//! - Without a recorder every call is a no-op

use std::time::Duration;

use metrics::{counter, histogram};

/// Record a request that produced a response.
pub fn record_request(method: &str, status: u16, latency: Duration) {
    counter!(
        "client_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("client_request_duration_seconds", "method" => method.to_string())
        .record(latency.as_secs_f64());
}

/// Record a request whose transport call failed.
pub fn record_transport_error(method: &str, latency: Duration) {
    counter!("client_transport_errors_total", "method" => method.to_string()).increment(1);
    histogram!("client_request_duration_seconds", "method" => method.to_string())
        .record(latency.as_secs_f64());
}
