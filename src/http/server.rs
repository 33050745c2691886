//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all catalog routes
//! - Wire up middleware (request ID, tracing, observability, timeout)
//! - Bind the server to a listener and serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::catalog::{CatalogService, CourseStore};
use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::middleware::observe_request;
use crate::http::request::request_id_layers;
use crate::lifecycle::signals;
use crate::observability::Telemetry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub telemetry: Arc<Telemetry>,
}

/// HTTP server for the course catalog.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig, telemetry: Arc<Telemetry>) -> Self {
        let store = CourseStore::new(&config.catalog.data_file);
        let catalog = Arc::new(CatalogService::new(store));
        let state = AppState { catalog, telemetry };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The observability middleware sits outside the timeout layer so that
    /// timed-out requests are still counted and logged, and inside the
    /// request-ID layers so the generated ID is visible to it.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let (set_request_id, propagate_request_id) = request_id_layers();

        Router::new()
            .route("/", get(handlers::home))
            .route("/catalog", get(handlers::course_catalog))
            .route(
                "/add_courses",
                get(handlers::add_course_form).post(handlers::submit_course),
            )
            .route("/course/{code}", get(handlers::course_details))
            .route("/health", get(handlers::health))
            .with_state(state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id)
                    .layer(propagate_request_id)
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn_with_state(state, observe_request))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(signals::shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
