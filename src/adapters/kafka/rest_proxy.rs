//! Kafka REST proxy publisher
//!
//! Publishes one provider record per call to the topic endpoint of the REST
//! proxy standing in front of the messaging platform. The proxy has a
//! two-level error model: the HTTP status of the publish call, and an
//! application-level error on the per-record offset acknowledgement. Both
//! surface as a typed [`PublishError`]; nothing is swallowed.

use crate::config::KafkaConfig;
use crate::domain::{Provider, PublishError, Result, SyncError};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::sync::watch;

use super::models::{PublishMessage, PublishRecord, PublishResponse};

/// Content type of the publish request body (JSON-embedded records).
const CONTENT_TYPE: &str = "application/vnd.kafka.json.v2+json";

/// Accept header for proxy v2 responses.
const ACCEPT: &str = "application/vnd.kafka.v2+json";

/// Destination for provider change records.
///
/// The poll orchestrator forwards each changed provider through this seam;
/// tests substitute a recording double.
#[async_trait::async_trait]
pub trait ProviderReceiver: Send + Sync {
    /// Publish one provider record downstream.
    async fn send_provider(
        &self,
        provider: &Provider,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<()>;
}

/// Publisher for provider change records.
pub struct KafkaRestProxyPublisher {
    http: Client,
    topic_url: String,
    topic: String,
}

impl KafkaRestProxyPublisher {
    /// Create a new publisher from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                SyncError::Configuration(format!("Failed to build Kafka HTTP client: {e}"))
            })?;

        let topic_url = format!(
            "{}/topics/{}",
            config.rest_proxy_url.trim_end_matches('/'),
            config.topic
        );

        Ok(Self {
            http,
            topic_url,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait::async_trait]
impl ProviderReceiver for KafkaRestProxyPublisher {
    /// Publish one provider record, keyed by its UKPRN.
    ///
    /// Exactly one record is sent per call and the proxy is expected to
    /// acknowledge exactly one offset; only the first offset is inspected.
    ///
    /// # Errors
    ///
    /// - [`PublishError::Transport`] on a non-2xx response
    /// - [`PublishError::Offset`] when the acknowledged offset carries an
    ///   error code or message
    /// - [`SyncError::Cancelled`] when the shutdown signal has fired
    async fn send_provider(
        &self,
        provider: &Provider,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<()> {
        if *shutdown.borrow() {
            tracing::info!("Shutdown requested, abandoning publish");
            return Err(SyncError::Cancelled);
        }

        tracing::info!(
            ukprn = provider.ukprn,
            topic = %self.topic,
            "Sending provider to Kafka topic"
        );

        let message = PublishMessage {
            records: vec![PublishRecord {
                key: provider.ukprn.to_string(),
                value: provider,
            }],
        };
        let body = serde_json::to_string(&message)?;

        let response = self
            .http
            .post(&self.topic_url)
            .header("Content-Type", CONTENT_TYPE)
            .header("Accept", ACCEPT)
            .body(body)
            .send()
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(PublishError::Transport {
                topic: self.topic.clone(),
                status: status.as_u16(),
                body: Some(response_body).filter(|b| !b.is_empty()),
            }
            .into());
        }

        let acknowledgement: PublishResponse = serde_json::from_str(&response_body)
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
        let offset = acknowledgement
            .offsets
            .first()
            .ok_or_else(|| PublishError::InvalidResponse("no offsets returned".to_string()))?;

        if offset.is_errored() {
            return Err(PublishError::Offset {
                status: status.as_u16(),
                partition: offset.partition,
                offset: offset.offset,
                error_code: offset.error_code.clone(),
                error: offset.error.clone(),
            }
            .into());
        }

        tracing::info!(
            ukprn = provider.ukprn,
            offset = offset.offset,
            partition = offset.partition,
            topic = %self.topic,
            "Message stored"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> KafkaConfig {
        KafkaConfig {
            rest_proxy_url: "http://localhost:8082/".to_string(),
            topic: "ukrlp-providers".to_string(),
            timeout_seconds: 30,
        }
    }

    #[test]
    fn topic_url_joins_base_and_topic() {
        let publisher = KafkaRestProxyPublisher::new(&test_config()).unwrap();
        assert_eq!(
            publisher.topic_url,
            "http://localhost:8082/topics/ukrlp-providers"
        );
    }

    #[tokio::test]
    async fn cancelled_before_sending() {
        let publisher = KafkaRestProxyPublisher::new(&test_config()).unwrap();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let provider = Provider {
            ukprn: 1,
            provider_name: None,
            accessible_provider_name: None,
            provider_status: "A".to_string(),
            provider_verification_date: None,
            expiry_date: None,
            provider_contacts: Vec::new(),
            verification_details: Vec::new(),
        };

        let result = publisher.send_provider(&provider, &rx).await;
        assert!(matches!(result, Err(SyncError::Cancelled)));
    }
}
