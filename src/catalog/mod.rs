//! Course catalog subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (validate submission, list, lookup)
//!     → store.rs (read/write the backing JSON file)
//!     → course_catalog.json (flat array of course records)
//! ```
//!
//! # Design Decisions
//! - The store has no schema enforcement; validation lives in the service
//! - Full read-modify-write on every append, no locking
//! - Duplicate course codes are allowed; lookup returns the first match

pub mod service;
pub mod store;
pub mod types;

pub use service::{CatalogService, SubmitError};
pub use store::{CourseStore, StoreError};
pub use types::Course;
