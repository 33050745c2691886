//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request produces:
//!     → logging.rs (one structured log line per request)
//!     → metrics.rs (request counter, latency histogram, error counter)
//!     → tracing.rs (one span per request, child spans per handler)
//!
//! Consumers:
//!     → Log aggregation (stdout JSON)
//!     → Metrics endpoint (Prometheus scrape)
//!     → Distributed tracing (OTLP collector, or stdout in development)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Telemetry handles are constructed once and injected, not global statics
//! - Metrics are cheap (atomic increments)
//! - Span export is optional and selected by config

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use tracing::Telemetry;
