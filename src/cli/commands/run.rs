//! Run command implementation
//!
//! Executes one poll pass: read watermark, query the register, forward
//! changes, write the watermark. Scheduling repeated passes is the
//! deployment's job (cron, a systemd timer, or similar); each invocation is
//! independent.

use crate::adapters::kafka::KafkaRestProxyPublisher;
use crate::adapters::state::FileStateStore;
use crate::adapters::ukrlp::UkrlpApiClient;
use crate::config::load_config;
use crate::core::ChangeProcessor;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {}

impl RunArgs {
    /// Execute one change-sync pass
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting change-sync pass");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration error");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let api = match UkrlpApiClient::new(&config.ukrlp) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create UKRLP client");
                eprintln!("Failed to create UKRLP client: {e}");
                return Ok(2);
            }
        };
        let receiver = match KafkaRestProxyPublisher::new(&config.kafka) {
            Ok(p) => Arc::new(p),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Kafka publisher");
                eprintln!("Failed to create Kafka publisher: {e}");
                return Ok(2);
            }
        };
        let state = Arc::new(FileStateStore::new(&config.state.dir));

        let processor = ChangeProcessor::new(api, receiver, state);

        match processor.process_changes(&shutdown_signal).await {
            Ok(()) => {
                tracing::info!("Change-sync pass completed");
                Ok(0)
            }
            Err(e) => {
                // The watermark was not advanced; the next scheduled pass
                // retries the same window
                tracing::error!(error = %e, "Change-sync pass failed");
                eprintln!("Change-sync pass failed: {e}");
                Ok(1)
            }
        }
    }
}
