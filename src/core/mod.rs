//! Core business logic
//!
//! The single piece of business logic in this service is the poll pass:
//! detect changes upstream, forward them downstream, advance the watermark.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ukrlp_sync::adapters::kafka::KafkaRestProxyPublisher;
//! use ukrlp_sync::adapters::state::FileStateStore;
//! use ukrlp_sync::adapters::ukrlp::UkrlpApiClient;
//! use ukrlp_sync::config::load_config;
//! use ukrlp_sync::core::ChangeProcessor;
//!
//! # async fn example() -> ukrlp_sync::domain::Result<()> {
//! let config = load_config("ukrlp-sync.toml")?;
//! let processor = ChangeProcessor::new(
//!     Arc::new(UkrlpApiClient::new(&config.ukrlp)?),
//!     Arc::new(KafkaRestProxyPublisher::new(&config.kafka)?),
//!     Arc::new(FileStateStore::new(&config.state.dir)),
//! );
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! processor.process_changes(&shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```

pub mod processor;

pub use processor::{ChangeProcessor, LAST_CHECKED_KEY};
