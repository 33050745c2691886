//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/observe.rs (span, timer, counters, log line)
//!     → handlers.rs (catalog routes)
//!     → views.rs (inline HTML pages)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;
pub mod views;

pub use request::{request_id_layers, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
