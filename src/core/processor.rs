//! Change processor - the poll orchestrator
//!
//! One invocation is a single linear pass: read the watermark, query the
//! register for changes since it, forward every changed provider downstream
//! in order, then write the new watermark. No retries, no batching; the
//! external scheduler decides when the next pass runs.
//!
//! The new watermark is the wall-clock time captured when querying begins,
//! not when the pass completes, and it is only written after every forward
//! succeeds. A failed pass therefore leaves the old watermark in place and
//! the next pass re-reads the same window: at-least-once delivery, with
//! downstream consumers expected to dedup by UKPRN. If forwarding outruns
//! the polling interval, a later pass's window can start before a slow pass
//! has registered its records; that trade-off is inherited deliberately.

use crate::adapters::kafka::ProviderReceiver;
use crate::adapters::ukrlp::xml::request::roundtrip_timestamp;
use crate::adapters::ukrlp::UkrlpApi;
use crate::domain::{Result, StateStore, SyncError};
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::watch;

/// State store key holding the watermark. Fixed; shared with the previously
/// deployed adapter so an upgraded installation carries its watermark over.
pub const LAST_CHECKED_KEY: &str = "LastChecked";

/// Orchestrates one poll pass over the register.
pub struct ChangeProcessor {
    api: Arc<dyn UkrlpApi>,
    receiver: Arc<dyn ProviderReceiver>,
    state: Arc<dyn StateStore>,
}

impl ChangeProcessor {
    /// Create a processor over the given collaborators.
    pub fn new(
        api: Arc<dyn UkrlpApi>,
        receiver: Arc<dyn ProviderReceiver>,
        state: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            api,
            receiver,
            state,
        }
    }

    /// Run one poll pass.
    ///
    /// # Errors
    ///
    /// Any query, publish, or state error aborts the pass immediately;
    /// providers already forwarded stay forwarded and the watermark is not
    /// advanced, so the next pass re-delivers the window.
    pub async fn process_changes(&self, shutdown: &watch::Receiver<bool>) -> Result<()> {
        tracing::info!("Getting last date UKRLP was checked");
        let stored = self.state.get_state(LAST_CHECKED_KEY, shutdown).await?;

        let last_checked = match stored.as_deref().filter(|s| !s.trim().is_empty()) {
            None => {
                let start_of_day = start_of_today();
                tracing::info!(
                    changed_since = %start_of_day,
                    "Never checked UKRLP for changes before. Starting from beginning of today"
                );
                start_of_day
            }
            Some(value) => {
                let parsed = parse_watermark(value)?;
                tracing::info!(changed_since = %parsed, "Getting changes since last check");
                parsed
            }
        };

        // The next watermark is the time querying begins, so changes made
        // while this pass runs fall into the next window
        let query_time = Utc::now();

        let changed_providers = self
            .api
            .providers_changed_since(last_checked, shutdown)
            .await?;
        tracing::info!(
            count = changed_providers.len(),
            changed_since = %last_checked,
            "Found changed providers"
        );

        for provider in &changed_providers {
            tracing::debug!(ukprn = provider.ukprn, "Sending provider");
            self.receiver.send_provider(provider, shutdown).await?;
        }
        tracing::info!(
            count = changed_providers.len(),
            "Finished sending provider changes"
        );

        let watermark = roundtrip_timestamp(query_time);
        self.state
            .set_state(LAST_CHECKED_KEY, &watermark, shutdown)
            .await?;
        tracing::info!(last_checked = %watermark, "Updated LastChecked");

        Ok(())
    }
}

/// Midnight today in local time, as a UTC instant.
fn start_of_today() -> DateTime<Utc> {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // A skipped local midnight (DST transition) falls back to the UTC day
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

fn parse_watermark(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SyncError::State(format!("Stored watermark '{value}' is not a timestamp: {e}")))
}
