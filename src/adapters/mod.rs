//! External integrations
//!
//! Adapters for the systems this service talks to: the UKRLP SOAP API
//! upstream, the Kafka REST proxy downstream, and the state store holding
//! the watermark between runs.

pub mod kafka;
pub mod state;
pub mod ukrlp;
