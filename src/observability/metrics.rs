//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_requests_total` (counter): total requests by route, method
//! - `route_processing_time_ms` (histogram): processing time by route, method
//! - `error_count` (counter): error responses and rejected submissions
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Labels for route and method; error_count also labels the error type
//! - Histogram buckets tuned for typical web latencies

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

pub const ROUTE_REQUESTS_TOTAL: &str = "route_requests_total";
pub const ROUTE_PROCESSING_TIME_MS: &str = "route_processing_time_ms";
pub const ERROR_COUNT: &str = "error_count";

/// Bucket boundaries in milliseconds.
const LATENCY_BUCKETS_MS: &[f64] = &[
    0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0,
];

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Failure to bind the exporter is logged, not fatal: the service keeps
/// running without metrics exposition.
pub fn init_metrics(addr: SocketAddr) {
    let builder = match PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(ROUTE_PROCESSING_TIME_MS.to_string()),
            LATENCY_BUCKETS_MS,
        ) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!(error = %e, "Failed to configure metrics exporter");
            return;
        }
    };

    if let Err(e) = builder.install() {
        tracing::error!(error = %e, address = %addr, "Failed to install metrics exporter");
        return;
    }

    describe_counter!(
        ROUTE_REQUESTS_TOTAL,
        Unit::Count,
        "Total requests to each route"
    );
    describe_histogram!(
        ROUTE_PROCESSING_TIME_MS,
        Unit::Milliseconds,
        "Processing time for each operation in milliseconds"
    );
    describe_counter!(ERROR_COUNT, Unit::Count, "Total errors encountered");

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record one completed request: counter, latency sample, and error counter
/// when the status is an error.
pub fn record_request(route: &str, method: &str, status: u16, elapsed_ms: f64) {
    counter!(
        ROUTE_REQUESTS_TOTAL,
        "route" => route.to_string(),
        "method" => method.to_string()
    )
    .increment(1);
    histogram!(
        ROUTE_PROCESSING_TIME_MS,
        "route" => route.to_string(),
        "method" => method.to_string()
    )
    .record(elapsed_ms);
    if status >= 400 {
        counter!(
            ERROR_COUNT,
            "route" => route.to_string(),
            "method" => method.to_string()
        )
        .increment(1);
    }
}

/// Record a submission rejected for missing fields.
pub fn record_missing_fields(route: &str) {
    counter!(
        ERROR_COUNT,
        "route" => route.to_string(),
        "error_type" => "missing_fields"
    )
    .increment(1);
}
