//! UKRLP provider query service integration
//!
//! The register is reachable only through a legacy SOAP interface. This
//! module holds the wire codec for the one request/response shape the poller
//! uses and the client that fans a poll out across the four provider
//! lifecycle statuses.

pub mod client;
pub mod xml;

pub use client::{UkrlpApi, UkrlpApiClient};
