//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use course_catalog::config::{AppConfig, TraceExporter};
use course_catalog::http::HttpServer;
use course_catalog::lifecycle::Shutdown;
use course_catalog::observability::Telemetry;

static NEXT_APP: AtomicUsize = AtomicUsize::new(0);

/// A running application instance on an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub data_file: PathBuf,
    #[allow(dead_code)]
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.data_file);
    }
}

/// Start the full application against a fresh scratch data file.
pub async fn spawn_app() -> TestApp {
    let data_file = std::env::temp_dir().join(format!(
        "course-catalog-app-{}-{}.json",
        std::process::id(),
        NEXT_APP.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&data_file);

    let mut config = AppConfig::default();
    config.catalog.data_file = data_file.display().to_string();
    config.observability.metrics_enabled = false;
    config.observability.trace_exporter = TraceExporter::None;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, Arc::new(Telemetry::disabled()));
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp {
        addr,
        data_file,
        shutdown,
    }
}

/// An HTTP client that does not follow redirects, so tests can assert on
/// the redirect responses themselves.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
