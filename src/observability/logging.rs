//! Structured logging.
//!
//! JSON lines to stdout in production, pretty output for development. The
//! level is configurable through `RUST_LOG`; the default keeps the
//! application at INFO and the HTTP plumbing quiet.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "course_catalog=info,tower_http=warn".into())
}

/// Install the global logging subscriber.
///
/// Call once at startup, before any log events are emitted.
pub fn init(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(default_filter());

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}
