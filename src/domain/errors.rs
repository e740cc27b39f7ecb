//! Domain error types
//!
//! The error hierarchy follows a closed taxonomy: one variant per failure
//! signal, each carrying its structured payload. Nothing is recovered
//! locally; every error propagates to the poll orchestrator and aborts the
//! current invocation without advancing the watermark. No third-party error
//! types leak through this surface.

use thiserror::Error;

/// Top-level error type used throughout the adapter.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors from the UKRLP query path
    #[error("UKRLP error: {0}")]
    Ukrlp(#[from] UkrlpError),

    /// Errors from the Kafka REST proxy publish path
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// State store errors
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The cooperative shutdown signal fired mid-run
    #[error("Operation cancelled by shutdown signal")]
    Cancelled,
}

/// Errors raised while querying the UKRLP SOAP service.
#[derive(Debug, Error)]
pub enum UkrlpError {
    /// The response body was not parseable XML at all
    #[error("Response is not valid XML: {0}")]
    MalformedResponse(String),

    /// Parseable XML, but not a SOAP envelope/body
    #[error("Response XML does not appear to be a valid SOAP response")]
    InvalidSoapResponse,

    /// The service returned a SOAP fault; takes precedence over HTTP status
    #[error(
        "Provider query returned a SOAP fault. Fault code={}, fault string={}",
        .fault_code.as_deref().unwrap_or(""),
        .fault_string.as_deref().unwrap_or("")
    )]
    Fault {
        fault_code: Option<String>,
        fault_string: Option<String>,
    },

    /// Non-2xx response with no parseable SOAP fault in the body
    #[error("Error calling UKRLP SOAP API. No fault returned. Http status {status}")]
    Transport { status: u16 },

    /// A required field was missing or unparseable in an otherwise valid response
    #[error("Invalid provider record: element '{element}': {reason}")]
    Field { element: String, reason: String },

    /// The request never produced an HTTP response
    #[error("Failed to reach UKRLP SOAP API: {0}")]
    Connection(String),
}

/// Errors raised while publishing a record through the Kafka REST proxy.
///
/// The gateway has a two-level error model: HTTP status first, then a
/// per-record error on the returned offset. Both map to their own variant so
/// callers get a single unambiguous failure type either way.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Non-2xx from the gateway; the offset body, if any, is not inspected
    #[error(
        "Error posting message to {topic}, http status {status} returned.{}",
        body_suffix(.body)
    )]
    Transport {
        topic: String,
        status: u16,
        body: Option<String>,
    },

    /// 2xx, but the returned offset carries an application-level error
    #[error(
        "Offset reports an error. Partition={partition}, Offset={offset}, Code={}{}",
        .error_code.as_deref().unwrap_or(""),
        body_suffix(.error)
    )]
    Offset {
        status: u16,
        partition: i64,
        offset: i64,
        error_code: Option<String>,
        error: Option<String>,
    },

    /// 2xx but the body was not the expected offsets envelope
    #[error("Unexpected response from Kafka REST proxy: {0}")]
    InvalidResponse(String),

    /// The request never produced an HTTP response
    #[error("Failed to reach Kafka REST proxy: {0}")]
    Connection(String),
}

/// Renders an optional message block on its own line, or nothing.
fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) if !text.is_empty() => format!("\n{text}"),
        _ => String::new(),
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
