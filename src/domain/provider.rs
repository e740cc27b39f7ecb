//! Provider domain model
//!
//! These types mirror the records returned by the UKRLP provider query
//! service and are what gets published, verbatim, to the Kafka topic. The
//! JSON casing on the wire is the service's PascalCase element naming, made
//! explicit per type with serde attributes rather than relying on any
//! process-wide serializer settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One changed provider record from the register.
///
/// The UKPRN (United Kingdom Provider Reference Number) is the stable
/// identity of a provider: it is the dedup key when merging the per-status
/// query results and the message key when publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Provider {
    /// Registration number, unique across the register
    #[serde(rename = "UnitedKingdomProviderReferenceNumber")]
    pub ukprn: i64,

    /// Registered name
    pub provider_name: Option<String>,

    /// Accessible (display) variant of the name
    pub accessible_provider_name: Option<String>,

    /// Lifecycle status code (e.g. A, V, PD1, PD2)
    pub provider_status: String,

    /// When the provider was last verified
    pub provider_verification_date: Option<DateTime<Utc>>,

    /// When the registration expires
    pub expiry_date: Option<DateTime<Utc>>,

    /// Contact records, in the order the service returned them
    pub provider_contacts: Vec<ProviderContact>,

    /// Verification records, in the order the service returned them
    pub verification_details: Vec<VerificationDetail>,
}

/// One contact record attached to a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderContact {
    /// Contact type code (e.g. P for primary, L for legal)
    pub contact_type: String,

    pub contact_role: Option<String>,

    pub contact_address: Address,

    pub contact_personal_details: PersonName,

    pub contact_telephone1: Option<String>,

    pub contact_telephone2: Option<String>,

    pub contact_fax: Option<String>,

    pub contact_website_address: Option<String>,

    pub contact_email: Option<String>,

    pub last_updated: Option<DateTime<Utc>>,
}

/// Postal address of a contact. Every line is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub town: Option<String>,
    pub county: Option<String>,
    pub post_code: Option<String>,
}

/// Structured person name of a contact, per the GovTalk person descriptives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonName {
    pub person_name_title: Option<String>,
    pub person_given_name: Option<String>,
    pub person_family_name: Option<String>,
    pub person_name_suffix: Option<String>,
    pub person_requested_name: Option<String>,
}

/// One verification record (which authority verified the provider, and
/// under what reference).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerificationDetail {
    pub verification_authority: Option<String>,

    #[serde(rename = "VerificationID")]
    pub verification_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_provider() -> Provider {
        Provider {
            ukprn: 10012345,
            provider_name: Some("Example College".to_string()),
            accessible_provider_name: None,
            provider_status: "A".to_string(),
            provider_verification_date: Some(Utc.with_ymd_and_hms(2020, 3, 14, 9, 30, 0).unwrap()),
            expiry_date: None,
            provider_contacts: vec![ProviderContact {
                contact_type: "P".to_string(),
                contact_telephone1: Some("0123 456 789".to_string()),
                contact_address: Address {
                    address1: Some("1 High Street".to_string()),
                    town: Some("Sheffield".to_string()),
                    post_code: Some("S1 1AA".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }],
            verification_details: vec![VerificationDetail {
                verification_authority: Some("Companies House".to_string()),
                verification_id: Some("01234567".to_string()),
            }],
        }
    }

    #[test]
    fn serializes_with_service_casing() {
        let json = serde_json::to_value(sample_provider()).unwrap();

        assert_eq!(json["UnitedKingdomProviderReferenceNumber"], 10012345);
        assert_eq!(json["ProviderName"], "Example College");
        assert_eq!(json["ProviderStatus"], "A");
        assert_eq!(json["ProviderContacts"][0]["ContactType"], "P");
        assert_eq!(
            json["ProviderContacts"][0]["ContactAddress"]["PostCode"],
            "S1 1AA"
        );
        assert_eq!(
            json["VerificationDetails"][0]["VerificationID"],
            "01234567"
        );
    }

    #[test]
    fn round_trips_through_json() {
        let provider = sample_provider();
        let json = serde_json::to_string(&provider).unwrap();
        let back: Provider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, back);
    }

    #[test]
    fn telephone_fields_keep_trailing_digit_in_name() {
        let json = serde_json::to_value(sample_provider()).unwrap();
        let contact = &json["ProviderContacts"][0];
        assert!(contact.get("ContactTelephone1").is_some());
        assert!(contact.get("ContactTelephone2").is_some());
    }
}
