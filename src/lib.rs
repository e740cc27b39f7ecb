// ukrlp-sync - UKRLP to Kafka change-sync adapter
// Licensed under the MIT License

//! # ukrlp-sync - UKRLP change-sync source adapter
//!
//! ukrlp-sync watches the UK Register of Learning Providers (UKRLP) for
//! changed provider records and republishes each change onto a Kafka topic
//! through the REST proxy, tracking a watermark so repeated runs are
//! incremental.
//!
//! ## Overview
//!
//! Each pass:
//! - **Reads** the watermark (the instant the register was last checked)
//! - **Queries** the register's legacy SOAP API once per provider lifecycle
//!   status, merging and deduplicating the results by UKPRN
//! - **Publishes** every changed provider, in order, to the Kafka topic
//! - **Advances** the watermark only after every publish succeeded
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The poll orchestrator ([`core::ChangeProcessor`])
//! - [`adapters`] - External integrations (UKRLP SOAP API, Kafka REST
//!   proxy, state store)
//! - [`domain`] - Core domain types and the error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ukrlp_sync::adapters::kafka::KafkaRestProxyPublisher;
//! use ukrlp_sync::adapters::state::FileStateStore;
//! use ukrlp_sync::adapters::ukrlp::UkrlpApiClient;
//! use ukrlp_sync::config::load_config;
//! use ukrlp_sync::core::ChangeProcessor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ukrlp-sync.toml")?;
//!
//!     let processor = ChangeProcessor::new(
//!         Arc::new(UkrlpApiClient::new(&config.ukrlp)?),
//!         Arc::new(KafkaRestProxyPublisher::new(&config.kafka)?),
//!         Arc::new(FileStateStore::new(&config.state.dir)),
//!     );
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     processor.process_changes(&shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Delivery semantics
//!
//! A failed pass never advances the watermark, so the next scheduled pass
//! re-reads the same window: at-least-once delivery. Records forwarded
//! before a mid-pass failure are re-sent on the retry; downstream consumers
//! dedup by UKPRN.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], with the failure
//! taxonomy in [`domain::SyncError`]:
//!
//! ```rust,no_run
//! use ukrlp_sync::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = ukrlp_sync::config::load_config("ukrlp-sync.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!(count = 17, "Found changed providers");
//! warn!(ukprn = 10012345_i64, "Provider already seen under another status");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
