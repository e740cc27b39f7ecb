//! UKRLP SOAP API client
//!
//! The provider query service only supports single-status selection, so one
//! poll fans out into four sequential queries, one per lifecycle status, and
//! merges the results. Merging dedupes on UKPRN: the same provider showing
//! up under two statuses is one logical change. The fan-out is sequential by
//! design; the upstream service is a low-volume legacy API.

use crate::config::UkrlpConfig;
use crate::domain::{
    ApprovedProvidersOnly, ChangeQuery, CriteriaCondition, Provider, ProviderStatus, Result,
    SyncError, UkrlpError,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;

use super::xml::{deserialize_response, serialize_query};

/// SOAPAction header value required by the provider query endpoint.
const SOAP_ACTION: &str = "retrieveAllProviders";

/// Source of changed provider records.
///
/// The poll orchestrator depends on this seam rather than on the SOAP
/// client directly, so tests can substitute a scripted source.
#[async_trait::async_trait]
pub trait UkrlpApi: Send + Sync {
    /// Fetch every provider changed since `changed_since`, deduplicated.
    async fn providers_changed_since(
        &self,
        changed_since: DateTime<Utc>,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<Vec<Provider>>;
}

/// Client for the UKRLP provider query SOAP service.
pub struct UkrlpApiClient {
    http: Client,
    endpoint: String,
    stakeholder_id: i32,
}

impl UkrlpApiClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &UkrlpConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                SyncError::Configuration(format!("Failed to build UKRLP HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            endpoint: config.base_url.clone(),
            stakeholder_id: config.stakeholder_id,
        })
    }

    /// Issue a single query and interpret the two-level response.
    ///
    /// A SOAP fault parsed from the body always wins over the HTTP status;
    /// a non-2xx status with no parseable fault is a transport error.
    async fn send_query(&self, query: &ChangeQuery) -> Result<Vec<Provider>> {
        let request_xml = serialize_query(query);

        let response = self
            .http
            .post(&self.endpoint)
            .header("SOAPAction", SOAP_ACTION)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(request_xml)
            .send()
            .await
            .map_err(|e| UkrlpError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UkrlpError::Connection(e.to_string()))?;

        match deserialize_response(&body) {
            Ok(providers) => {
                if !status.is_success() {
                    return Err(UkrlpError::Transport {
                        status: status.as_u16(),
                    }
                    .into());
                }
                Ok(providers)
            }
            Err(fault @ UkrlpError::Fault { .. }) => Err(fault.into()),
            Err(other) => {
                if !status.is_success() {
                    // Non-2xx with an unparseable body (e.g. an HTML error
                    // page): the HTTP status is the signal worth keeping
                    return Err(UkrlpError::Transport {
                        status: status.as_u16(),
                    }
                    .into());
                }
                Err(other.into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UkrlpApi for UkrlpApiClient {
    /// Fetch every provider changed since `changed_since`, across all four
    /// lifecycle statuses, deduplicated by UKPRN.
    ///
    /// Exactly one query is issued per status in `{A, V, PD1, PD2}`,
    /// regardless of intermediate result sizes. The shutdown signal is
    /// checked before each network call; once signalled the whole call fails
    /// with [`SyncError::Cancelled`] and no partial result is returned.
    async fn providers_changed_since(
        &self,
        changed_since: DateTime<Utc>,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<Vec<Provider>> {
        let mut merged: Vec<Provider> = Vec::new();
        let mut seen: HashSet<i64> = HashSet::new();

        for status in ProviderStatus::ALL {
            if *shutdown.borrow() {
                tracing::info!("Shutdown requested, abandoning provider query fan-out");
                return Err(SyncError::Cancelled);
            }

            let query = ChangeQuery {
                query_id: uuid::Uuid::new_v4().simple().to_string(),
                changed_since: Some(changed_since),
                status,
                condition: CriteriaCondition::Or,
                approved_only: ApprovedProvidersOnly::No,
                stakeholder_id: self.stakeholder_id,
                ukprn_list: None,
            };

            let providers = self.send_query(&query).await?;
            tracing::debug!(
                status = %status,
                count = providers.len(),
                "Provider query returned"
            );

            for provider in providers {
                if seen.insert(provider.ukprn) {
                    merged.push(provider);
                }
            }
        }

        tracing::info!(count = merged.len(), "Merged providers across status queries");
        Ok(merged)
    }
}
