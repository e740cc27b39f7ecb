//! Kafka REST proxy integration
//!
//! The downstream messaging platform is fronted by a REST proxy; providers
//! are published one record at a time to its topic endpoint.

pub mod models;
pub mod rest_proxy;

pub use rest_proxy::{KafkaRestProxyPublisher, ProviderReceiver};
