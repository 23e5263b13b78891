//! Core types for the irvault upload backend.
//!
//! This crate holds configuration, the unified `AppError` type, domain
//! models, and the filename deduplication helpers shared by the other
//! workspace crates.

pub mod config;
pub mod error;
pub mod filename;
pub mod models;

pub use config::Config;
pub use error::AppError;
