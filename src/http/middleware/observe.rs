//! Per-request observability middleware.
//!
//! Wraps every route, matched or not, with the same lifecycle: open a span
//! named `"<METHOD> <PATH>"` and start a timer on the way in; on the way out
//! tag the span with the status, record the request counter and latency
//! histogram, bump the error counter for 4xx/5xx, close the span, and emit
//! one structured log line.
//!
//! The span/timer pair lives in a [`RequestObservation`] guard. Finalization
//! runs on every exit path: normally when the response comes back, and from
//! `Drop` when the request future is cancelled before producing one, so no
//! span is ever leaked.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::{SpanKind, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};

use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::observability::{metrics, Telemetry};

/// Status recorded when a request is dropped before a response exists.
const STATUS_CLIENT_ABORT: u16 = 499;

/// Trace context of the in-flight request, for handlers that open child
/// spans. Inserted into request extensions by [`observe_request`].
#[derive(Clone)]
pub struct RequestTrace(pub Context);

/// Scoped span/timer pair for one request.
pub struct RequestObservation {
    cx: Context,
    start: Instant,
    method: String,
    path: String,
    client: SocketAddr,
    request_id: Option<String>,
    completed: bool,
}

impl RequestObservation {
    /// Open the request span and start the timer.
    pub fn begin(telemetry: &Telemetry, request: &Request, client: SocketAddr) -> Self {
        let method = request.method().to_string();
        let path = request.uri().path().to_string();
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let span = telemetry
            .tracer()
            .span_builder(format!("{method} {path}"))
            .with_kind(SpanKind::Server)
            .with_attributes([
                KeyValue::new("http.method", method.clone()),
                KeyValue::new("http.url", request.uri().to_string()),
            ])
            .start(telemetry.tracer());

        Self {
            cx: Context::current_with_span(span),
            start: Instant::now(),
            method,
            path,
            client,
            request_id,
            completed: false,
        }
    }

    /// Trace context carrying the request span, for child spans.
    pub fn context(&self) -> Context {
        self.cx.clone()
    }

    /// Finalize with the response status.
    pub fn complete(mut self, status: StatusCode) {
        self.finish(Some(status));
    }

    fn finish(&mut self, status: Option<StatusCode>) {
        if self.completed {
            return;
        }
        self.completed = true;

        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let status_code = status.map_or(STATUS_CLIENT_ABORT, |s| s.as_u16());

        let span = self.cx.span();
        span.set_attribute(KeyValue::new("http.status_code", status_code as i64));
        if status_code >= 400 {
            span.set_attribute(KeyValue::new("error", true));
        }
        span.end();

        metrics::record_request(&self.path, &self.method, status_code, elapsed_ms);

        match status {
            Some(_) => tracing::info!(
                method = %self.method,
                path = %self.path,
                status_code,
                user_ip = %self.client.ip(),
                processing_time_ms = elapsed_ms,
                request_id = self.request_id.as_deref(),
                "Request processed"
            ),
            None => tracing::warn!(
                method = %self.method,
                path = %self.path,
                user_ip = %self.client.ip(),
                processing_time_ms = elapsed_ms,
                request_id = self.request_id.as_deref(),
                "Request dropped before a response was produced"
            ),
        }
    }
}

impl Drop for RequestObservation {
    fn drop(&mut self) {
        self.finish(None);
    }
}

/// The middleware itself. Applied to the whole router, including the
/// fallback, so unmatched paths are instrumented too.
pub async fn observe_request(
    State(state): State<AppState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Response {
    let observation = RequestObservation::begin(&state.telemetry, &request, client);
    request
        .extensions_mut()
        .insert(RequestTrace(observation.context()));

    let response = next.run(request).await;

    observation.complete(response.status());
    response
}
