//! irvault API library
//!
//! HTTP handlers, auth middleware, the upload pipeline, and application
//! setup. The binary in `main.rs` wires configuration into
//! `setup::initialize_app`; integration tests build the same router around
//! in-memory fakes of the warehouse, storage, and notifier seams.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
pub use state::AppState;
