//! Distributed tracing support.
//!
//! Builds the OpenTelemetry tracer provider at startup and hands out a
//! [`Telemetry`] context that the HTTP layer carries in its state. Spans are
//! exported through a batching OTLP exporter, printed to stdout in
//! development, or dropped entirely when tracing is disabled.

use opentelemetry::global::{self, BoxedSpan, BoxedTracer};
use opentelemetry::trace::Tracer;
use opentelemetry::Context;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::{propagation::TraceContextPropagator, Resource};
use thiserror::Error;

use crate::config::{ObservabilityConfig, TraceExporter};

/// Error type for tracer initialization.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build span exporter: {0}")]
    Exporter(String),
}

/// Handles to the tracing pipeline, injected into request handlers.
///
/// Constructed once at startup. Holding the provider keeps the batch
/// processor alive and lets shutdown flush pending spans.
pub struct Telemetry {
    tracer: BoxedTracer,
    provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    /// Build the tracing pipeline selected by config.
    pub fn init(config: &ObservabilityConfig) -> Result<Self, TelemetryError> {
        let provider = match config.trace_exporter {
            TraceExporter::None => None,
            TraceExporter::Stdout => {
                let provider = SdkTracerProvider::builder()
                    .with_resource(Self::resource(config))
                    .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
                    .build();
                Some(provider)
            }
            TraceExporter::Otlp => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .with_endpoint(config.otlp_endpoint.clone())
                    .build()
                    .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
                let provider = SdkTracerProvider::builder()
                    .with_resource(Self::resource(config))
                    .with_batch_exporter(exporter)
                    .build();
                Some(provider)
            }
        };

        if let Some(provider) = &provider {
            global::set_text_map_propagator(TraceContextPropagator::new());
            global::set_tracer_provider(provider.clone());
        }

        Ok(Self {
            tracer: global::tracer(config.service_name.clone()),
            provider,
        })
    }

    /// A telemetry context whose spans go nowhere. For tests.
    pub fn disabled() -> Self {
        Self {
            tracer: global::tracer("noop"),
            provider: None,
        }
    }

    pub fn tracer(&self) -> &BoxedTracer {
        &self.tracer
    }

    /// Open a handler span as a child of the request span.
    pub fn handler_span(&self, name: &'static str, parent: &Context) -> BoxedSpan {
        self.tracer
            .span_builder(name)
            .start_with_context(&self.tracer, parent)
    }

    /// Flush pending spans and shut the pipeline down.
    pub fn shutdown(&self) {
        if let Some(provider) = &self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Tracer provider shutdown failed");
            }
        }
    }

    fn resource(config: &ObservabilityConfig) -> Resource {
        Resource::builder()
            .with_service_name(config.service_name.clone())
            .build()
    }
}
