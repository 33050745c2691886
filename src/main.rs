//! Course Catalog Service
//!
//! A small web application for browsing and submitting course catalog
//! entries, instrumented end to end.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │              COURSE CATALOG                  │
//!                    │                                              │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│ request  │──▶│ observe  │──▶│ catalog │  │
//!                    │  │ id layer │   │middleware│   │ routes  │  │
//!                    │  └──────────┘   └────┬─────┘   └────┬────┘  │
//!                    │                      │              │       │
//!                    │       span + timer + │              ▼       │
//!                    │       counters + log │       ┌───────────┐  │
//!                    │                      │       │  catalog  │  │
//!   Client Response  │                      │       │  service  │  │
//!   ◀────────────────┼──────────────────────┘       └─────┬─────┘  │
//!                    │                                    ▼        │
//!                    │                            ┌─────────────┐  │
//!                    │                            │ course store│  │
//!                    │                            │ (JSON file) │  │
//!                    │                            └─────────────┘  │
//!                    │                                              │
//!                    │  Cross-cutting: config · lifecycle · logs ·  │
//!                    │  OTLP spans · Prometheus metrics             │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use course_catalog::config::{self, AppConfig};
use course_catalog::http::HttpServer;
use course_catalog::lifecycle::Shutdown;
use course_catalog::observability::{logging, metrics, Telemetry};

#[derive(Parser, Debug)]
#[command(name = "course-catalog", about = "Course catalog web service")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address from the config.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);
    let telemetry = Arc::new(Telemetry::init(&config.observability)?);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        data_file = %config.catalog.data_file,
        "course-catalog starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, telemetry.clone());

    server.run(listener, shutdown.subscribe()).await?;

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    Ok(())
}
