//! Kafka REST proxy wire models
//!
//! Request and response shapes for the proxy's topic publish endpoint. The
//! request wraps records as `{"records": [{"key", "value"}]}`; the response
//! acknowledges each record with a partition/offset pair that may instead
//! carry an application-level error.

use crate::domain::Provider;
use serde::{Deserialize, Serialize};

/// Publish envelope sent to `POST /topics/{topic}`.
#[derive(Debug, Serialize)]
pub struct PublishMessage<'a> {
    pub records: Vec<PublishRecord<'a>>,
}

/// One keyed record inside a publish envelope.
///
/// The key is the provider's UKPRN in decimal string form.
#[derive(Debug, Serialize)]
pub struct PublishRecord<'a> {
    pub key: String,
    pub value: &'a Provider,
}

/// Response envelope from the publish endpoint.
#[derive(Debug, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub offsets: Vec<ResponseOffset>,
}

/// Per-record acknowledgement.
///
/// On success `partition`/`offset` locate the stored message; on failure the
/// proxy sets `error` and/or `error_code` instead.
#[derive(Debug, Deserialize)]
pub struct ResponseOffset {
    #[serde(default)]
    pub partition: i64,

    #[serde(default)]
    pub offset: i64,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default, rename = "error_code")]
    pub error_code: Option<String>,
}

impl ResponseOffset {
    /// Whether the proxy flagged this record as failed.
    pub fn is_errored(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
            || self.error_code.as_deref().is_some_and(|c| !c.is_empty())
    }
}
