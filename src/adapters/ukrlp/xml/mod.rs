//! SOAP wire codec for the provider query service
//!
//! Only the one request/response shape used by the change poller is
//! supported; this is deliberately not a general SOAP toolkit. The
//! serializer reproduces the exact element structure the legacy service
//! expects, and the deserializer mirrors the service's nested response
//! layout, including its mixed namespace usage.

pub mod request;
pub mod response;
pub mod tree;

pub use request::serialize_query;
pub use response::deserialize_response;

/// SOAP 1.1 envelope namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// UKRLP provider query service namespace.
pub const UKRLP_NS: &str = "http://ukrlp.co.uk.server.ws.v3";

/// GovTalk person descriptives namespace, used by contact personal details.
pub const GOVTALK_NS: &str = "http://www.govtalk.gov.uk/people/PersonDescriptives";
