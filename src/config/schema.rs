//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the course catalog service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Catalog storage settings.
    pub catalog: CatalogConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Catalog storage settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the JSON file holding the course collection.
    pub data_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: "course_catalog.json".to_string(),
        }
    }
}

/// Request timeout settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON lines, for production.
    Json,
    /// Human-readable output, for development.
    Pretty,
}

/// Span exporter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceExporter {
    /// Batched export to an OTLP collector endpoint.
    Otlp,
    /// Spans printed to stdout, for development.
    Stdout,
    /// Tracing disabled.
    None,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to exported telemetry.
    pub service_name: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Which span exporter to install.
    pub trace_exporter: TraceExporter,

    /// Collector endpoint used when `trace_exporter = "otlp"`.
    pub otlp_endpoint: String,

    /// Whether to serve Prometheus metrics.
    pub metrics_enabled: bool,

    /// Scrape address for the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "course-catalog".to_string(),
            log_format: LogFormat::Json,
            trace_exporter: TraceExporter::Otlp,
            otlp_endpoint: "http://localhost:4318/v1/traces".to_string(),
            metrics_enabled: true,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
