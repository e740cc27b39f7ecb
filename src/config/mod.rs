//! Configuration management.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}`), `UKRLP_SYNC_*` overrides, defaults for optional
//! settings, and validation before use.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "ukrlp-sync"
//! log_level = "info"
//!
//! [ukrlp]
//! base_url = "https://ws.ukrlp.co.uk/UkrlpProviderQueryWS6/ProviderQueryServiceV6"
//! stakeholder_id = 9
//!
//! [kafka]
//! rest_proxy_url = "http://rest-proxy:8082"
//! topic = "ukrlp-providers"
//!
//! [state]
//! dir = "/var/lib/ukrlp-sync/state"
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, KafkaConfig, LoggingConfig, StateConfig, SyncConfig, UkrlpConfig,
};
