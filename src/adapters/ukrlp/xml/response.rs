//! Provider query response deserializer
//!
//! Walks the SOAP response down to the matching provider records and maps
//! them field-by-element onto the domain model. Failure priority: not XML,
//! then not SOAP, then a SOAP fault, then record-level field errors. A
//! missing `ProviderQueryResponse` element is a legitimate empty result, not
//! an error.

use crate::domain::{
    Address, PersonName, Provider, ProviderContact, UkrlpError, VerificationDetail,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::tree::{self, Element};
use super::{GOVTALK_NS, SOAP_NS, UKRLP_NS};

/// Deserialize a provider query response body.
///
/// # Errors
///
/// - [`UkrlpError::MalformedResponse`] when the body is not XML
/// - [`UkrlpError::InvalidSoapResponse`] when the envelope/body is missing
/// - [`UkrlpError::Fault`] when the body carries a SOAP fault
/// - [`UkrlpError::Field`] when a required record field is missing or does
///   not parse
pub fn deserialize_response(xml: &str) -> Result<Vec<Provider>, UkrlpError> {
    let root = tree::parse(xml).map_err(UkrlpError::MalformedResponse)?;

    let body = Some(&root)
        .filter(|r| r.is(Some(SOAP_NS), "Envelope"))
        .and_then(|r| r.child(Some(SOAP_NS), "Body"))
        .ok_or(UkrlpError::InvalidSoapResponse)?;

    if let Some(fault) = body.child(Some(SOAP_NS), "Fault") {
        return Err(UkrlpError::Fault {
            fault_code: fault.child_text(None, "faultcode").map(str::to_string),
            fault_string: fault.child_text(None, "faultstring").map(str::to_string),
        });
    }

    // No response element means the query matched nothing
    let Some(response) = body.child(Some(UKRLP_NS), "ProviderQueryResponse") else {
        return Ok(Vec::new());
    };

    response
        .children(None, "MatchingProviderRecords")
        .map(provider_from_record)
        .collect()
}

fn provider_from_record(record: &Element) -> Result<Provider, UkrlpError> {
    let ukprn = required_text(record, "UnitedKingdomProviderReferenceNumber")?
        .parse::<i64>()
        .map_err(|e| field_error("UnitedKingdomProviderReferenceNumber", e.to_string()))?;

    let provider_contacts = record
        .children(None, "ProviderContact")
        .map(contact_from_element)
        .collect::<Result<Vec<_>, _>>()?;

    let verification_details = record
        .children(None, "VerificationDetails")
        .map(verification_from_element)
        .collect();

    Ok(Provider {
        ukprn,
        provider_name: optional_text(record, "ProviderName"),
        accessible_provider_name: optional_text(record, "AccessibleProviderName"),
        provider_status: required_text(record, "ProviderStatus")?.to_string(),
        provider_verification_date: optional_date(record, "ProviderVerificationDate")?,
        expiry_date: optional_date(record, "ExpiryDate")?,
        provider_contacts,
        verification_details,
    })
}

fn contact_from_element(contact: &Element) -> Result<ProviderContact, UkrlpError> {
    let address = contact.child(None, "ContactAddress");
    let personal = contact.child(None, "ContactPersonalDetails");

    Ok(ProviderContact {
        contact_type: required_text(contact, "ContactType")?.to_string(),
        contact_role: optional_text(contact, "ContactRole"),
        contact_address: Address {
            address1: address.and_then(|a| optional_text(a, "Address1")),
            address2: address.and_then(|a| optional_text(a, "Address2")),
            address3: address.and_then(|a| optional_text(a, "Address3")),
            address4: address.and_then(|a| optional_text(a, "Address4")),
            town: address.and_then(|a| optional_text(a, "Town")),
            county: address.and_then(|a| optional_text(a, "County")),
            post_code: address.and_then(|a| optional_text(a, "PostCode")),
        },
        contact_personal_details: PersonName {
            person_name_title: personal.and_then(|p| govtalk_text(p, "PersonNameTitle")),
            person_given_name: personal.and_then(|p| govtalk_text(p, "PersonGivenName")),
            person_family_name: personal.and_then(|p| govtalk_text(p, "PersonFamilyName")),
            person_name_suffix: personal.and_then(|p| govtalk_text(p, "PersonNameSuffix")),
            person_requested_name: personal.and_then(|p| govtalk_text(p, "PersonRequestedName")),
        },
        contact_telephone1: optional_text(contact, "ContactTelephone1"),
        contact_telephone2: optional_text(contact, "ContactTelephone2"),
        contact_fax: optional_text(contact, "ContactFax"),
        contact_website_address: optional_text(contact, "ContactWebsiteAddress"),
        contact_email: optional_text(contact, "ContactEmail"),
        last_updated: optional_date(contact, "LastUpdated")?,
    })
}

fn verification_from_element(verification: &Element) -> VerificationDetail {
    VerificationDetail {
        verification_authority: optional_text(verification, "VerificationAuthority"),
        verification_id: optional_text(verification, "VerificationID"),
    }
}

fn required_text<'a>(element: &'a Element, name: &str) -> Result<&'a str, UkrlpError> {
    element
        .child_text(None, name)
        .ok_or_else(|| field_error(name, "required element is missing".to_string()))
}

fn optional_text(element: &Element, name: &str) -> Option<String> {
    element.child_text(None, name).map(str::to_string)
}

fn govtalk_text(element: &Element, name: &str) -> Option<String> {
    element
        .child_text(Some(GOVTALK_NS), name)
        .map(str::to_string)
}

fn optional_date(element: &Element, name: &str) -> Result<Option<DateTime<Utc>>, UkrlpError> {
    match element.child_text(None, name) {
        None => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .map_err(|reason| field_error(name, reason)),
    }
}

/// The service emits several datetime shapes depending on the record's age;
/// accept RFC 3339, zone-less date-times (read as UTC), and bare dates.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(format!("unrecognised timestamp '{value}'"))
}

fn field_error(element: &str, reason: String) -> UkrlpError {
    UkrlpError::Field {
        element: element.to_string(),
        reason,
    }
}
