//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ukrlp-sync.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: ukrlp-sync validate-config");
                println!("  3. Run a sync pass: ukrlp-sync run");
                println!("  4. Schedule repeated passes with cron or a systemd timer");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn starter_config() -> &'static str {
        r#"# ukrlp-sync configuration
# Mirrors UKRLP provider changes onto a Kafka topic via the REST proxy.

[application]
name = "ukrlp-sync"
log_level = "info"

[ukrlp]
# Provider query SOAP endpoint
base_url = "https://ws.ukrlp.co.uk/UkrlpProviderQueryWS6/ProviderQueryServiceV6"
# Stakeholder id assigned by the register
stakeholder_id = 9
timeout_seconds = 30

[kafka]
rest_proxy_url = "http://rest-proxy:8082"
topic = "ukrlp-providers"
timeout_seconds = 30

[state]
# Directory holding the watermark between runs
dir = "./state"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
    }
}
