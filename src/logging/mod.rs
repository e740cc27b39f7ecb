//! Logging and observability
//!
//! Structured logging via `tracing`: console output always, optional
//! rolling JSON files for deployments that collect logs from disk.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
