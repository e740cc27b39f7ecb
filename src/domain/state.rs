//! State store contract
//!
//! The watermark lives in an external key-value store owned by the
//! deployment, not by this core. The contract is a plain string get/set; the
//! poll orchestrator reads and writes a single fixed key through it.

use crate::domain::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Key-value state persistence consumed by the poll orchestrator.
///
/// Implementations must treat an unknown key as `Ok(None)`, not an error.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    async fn get_state(
        &self,
        key: &str,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set_state(
        &self,
        key: &str,
        value: &str,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<()>;
}
