//! Provider change query model
//!
//! A [`ChangeQuery`] is an ephemeral value describing one filtered query
//! against the UKRLP provider query service. The query client builds four of
//! them per poll, one per lifecycle status, because the upstream service only
//! supports single-status selection criteria.

use chrono::{DateTime, Utc};
use std::fmt;

/// Provider lifecycle status codes accepted by the upstream service.
///
/// Serialized to XML as the bare token names; the service is a legacy
/// typed-XML endpoint expecting these literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderStatus {
    /// Active
    A,
    /// Verified
    V,
    /// Pending dissolution (first variant)
    PD1,
    /// Pending dissolution (second variant)
    PD2,
}

impl ProviderStatus {
    /// The four statuses queried on every poll, in the fixed fan-out order.
    pub const ALL: [ProviderStatus; 4] = [
        ProviderStatus::A,
        ProviderStatus::V,
        ProviderStatus::PD1,
        ProviderStatus::PD2,
    ];

    /// Wire token for the `ProviderStatus` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::A => "A",
            ProviderStatus::V => "V",
            ProviderStatus::PD1 => "PD1",
            ProviderStatus::PD2 => "PD2",
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How multiple selection criteria combine upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaCondition {
    And,
    Or,
}

impl CriteriaCondition {
    /// Wire token for the `CriteriaCondition` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            CriteriaCondition::And => "AND",
            CriteriaCondition::Or => "OR",
        }
    }
}

impl fmt::Display for CriteriaCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the query is restricted to approved providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovedProvidersOnly {
    Yes,
    No,
}

impl ApprovedProvidersOnly {
    /// Wire token for the `ApprovedProvidersOnly` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovedProvidersOnly::Yes => "Yes",
            ApprovedProvidersOnly::No => "No",
        }
    }
}

impl fmt::Display for ApprovedProvidersOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filtered query against the provider query service.
///
/// Built fresh per call; `query_id` only needs to be unique across the four
/// queries of a single poll.
#[derive(Debug, Clone)]
pub struct ChangeQuery {
    /// Correlation id echoed by the service; must be non-empty
    pub query_id: String,

    /// Only providers updated since this instant are returned, when set
    pub changed_since: Option<DateTime<Utc>>,

    /// Single status filter (the service supports no multi-status query)
    pub status: ProviderStatus,

    /// AND/OR combination of the criteria
    pub condition: CriteriaCondition,

    /// Approved-providers-only restriction
    pub approved_only: ApprovedProvidersOnly,

    /// Caller identity assigned by the register
    pub stakeholder_id: i32,

    /// Optional explicit UKPRN selection
    pub ukprn_list: Option<Vec<i64>>,
}
