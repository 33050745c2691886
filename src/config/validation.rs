//! Configuration validation.
//!
//! Semantic checks on an already-deserialized [`AppConfig`]. All violations
//! are reported at once, not just the first.

use std::net::SocketAddr;

use crate::config::schema::{AppConfig, TraceExporter};

/// A single semantic violation found in the config.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    EmptyDataFile,
    ZeroRequestTimeout,
    EmptyOtlpEndpoint,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {addr:?} is not a socket address")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(
                    f,
                    "observability.metrics_address {addr:?} is not a socket address"
                )
            }
            ValidationError::EmptyDataFile => write!(f, "catalog.data_file must not be empty"),
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
            ValidationError::EmptyOtlpEndpoint => {
                write!(
                    f,
                    "observability.otlp_endpoint must be set when trace_exporter is \"otlp\""
                )
            }
        }
    }
}

/// Check an [`AppConfig`] for semantic violations, returning all of them.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.catalog.data_file.is_empty() {
        errors.push(ValidationError::EmptyDataFile);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.trace_exporter == TraceExporter::Otlp
        && config.observability.otlp_endpoint.is_empty()
    {
        errors.push(ValidationError::EmptyOtlpEndpoint);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
