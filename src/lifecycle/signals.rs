//! OS signal handling.

use tokio::sync::broadcast;

/// Resolve when Ctrl-C arrives or the coordinator triggers shutdown.
pub async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown requested");
        }
    }
}
