//! Result type alias
//!
//! Convenience alias used throughout the crate for fallible operations.

use super::errors::SyncError;

/// Result type alias using [`SyncError`] as the error type
pub type Result<T> = std::result::Result<T, SyncError>;
