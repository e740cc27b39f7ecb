//! Provider query request serializer
//!
//! Turns a [`ChangeQuery`] into the SOAP envelope the provider query service
//! expects. Serialization is total: the caller constructs the query, so
//! there is no failure mode. The element order inside `SelectionCriteria` is
//! fixed by the service's schema and must not change.

use crate::domain::ChangeQuery;
use chrono::{DateTime, Utc};

use super::{SOAP_NS, UKRLP_NS};

/// Serialize a query to its SOAP request body.
pub fn serialize_query(query: &ChangeQuery) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str("<soapenv:Envelope xmlns:soapenv=\"");
    xml.push_str(SOAP_NS);
    xml.push_str("\" xmlns:ukrlp=\"");
    xml.push_str(UKRLP_NS);
    xml.push_str("\">");
    xml.push_str("<soapenv:Header/>");
    xml.push_str("<soapenv:Body>");
    xml.push_str("<ukrlp:ProviderQueryRequest>");

    push_selection_criteria(&mut xml, query);

    push_element(&mut xml, "QueryId", &query.query_id);

    xml.push_str("</ukrlp:ProviderQueryRequest>");
    xml.push_str("</soapenv:Body>");
    xml.push_str("</soapenv:Envelope>");

    xml
}

fn push_selection_criteria(xml: &mut String, query: &ChangeQuery) {
    xml.push_str("<SelectionCriteria>");

    push_element(xml, "CriteriaCondition", query.condition.as_str());
    push_element(xml, "ApprovedProvidersOnly", query.approved_only.as_str());
    push_element(xml, "ProviderStatus", query.status.as_str());
    push_element(xml, "StakeholderId", &query.stakeholder_id.to_string());

    if let Some(ukprns) = query.ukprn_list.as_deref() {
        if !ukprns.is_empty() {
            xml.push_str("<UnitedKingdomProviderReferenceNumberList>");
            for ukprn in ukprns {
                push_element(
                    xml,
                    "UnitedKingdomProviderReferenceNumber",
                    &ukprn.to_string(),
                );
            }
            xml.push_str("</UnitedKingdomProviderReferenceNumberList>");
        }
    }

    if let Some(changed_since) = query.changed_since {
        push_element(xml, "ProviderUpdatedSince", &roundtrip_timestamp(changed_since));
    }

    xml.push_str("</SelectionCriteria>");
}

fn push_element(xml: &mut String, name: &str, value: &str) {
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&xml_escape(value));
    xml.push_str("</");
    xml.push_str(name);
    xml.push('>');
}

/// UTC round-trip timestamp, matching the format the legacy service was fed
/// by its original consumers (seven fractional digits, `Z` suffix).
pub fn roundtrip_timestamp(instant: DateTime<Utc>) -> String {
    // chrono has no seven-digit precision specifier; ticks = nanos / 100
    format!(
        "{}.{:07}Z",
        instant.format("%Y-%m-%dT%H:%M:%S"),
        instant.timestamp_subsec_nanos() / 100
    )
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
