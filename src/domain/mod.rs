//! Domain models and types.
//!
//! The domain layer provides:
//! - **Provider records** ([`Provider`], [`ProviderContact`], [`Address`],
//!   [`PersonName`], [`VerificationDetail`]) — the value objects read from
//!   the register and republished downstream
//! - **Query values** ([`ChangeQuery`] and its criteria enums) — the
//!   ephemeral per-call request model
//! - **Error types** ([`SyncError`], [`UkrlpError`], [`PublishError`]) — the
//!   closed failure taxonomy
//! - **State contract** ([`StateStore`]) — the external watermark store seam
//! - **Result type alias** ([`Result`])
//!
//! All entities are value objects created fresh per call and never mutated
//! after construction; nothing here outlives a single query/publish cycle
//! except the externally-owned watermark string.

pub mod errors;
pub mod provider;
pub mod query;
pub mod result;
pub mod state;

// Re-export commonly used types for convenience
pub use errors::{PublishError, SyncError, UkrlpError};
pub use provider::{Address, PersonName, Provider, ProviderContact, VerificationDetail};
pub use query::{ApprovedProvidersOnly, ChangeQuery, CriteriaCondition, ProviderStatus};
pub use result::Result;
pub use state::StateStore;
