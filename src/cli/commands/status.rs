//! Status command implementation
//!
//! Shows the stored watermark, i.e. the instant up to which provider
//! changes have been forwarded.

use crate::adapters::state::FileStateStore;
use crate::config::load_config;
use crate::core::LAST_CHECKED_KEY;
use crate::domain::StateStore;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking sync status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let store = FileStateStore::new(&config.state.dir);
        let (_tx, shutdown_rx) = watch::channel(false);

        match store.get_state(LAST_CHECKED_KEY, &shutdown_rx).await {
            Ok(Some(watermark)) => {
                println!("Sync Status");
                println!();
                println!("  State Directory: {}", config.state.dir);
                println!("  Last Checked:    {watermark}");
                Ok(0)
            }
            Ok(None) => {
                println!("Sync Status");
                println!();
                println!("  State Directory: {}", config.state.dir);
                println!("  Last Checked:    never (next run starts from today)");
                Ok(0)
            }
            Err(e) => {
                println!("Failed to read state");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
