//! Off-chain credential metadata document.
//!
//! Pinned alongside the supporting document during issuance so that a
//! verifier can render a human-readable view without touching ledger
//! state. Field order is fixed by the struct, which keeps the pinned
//! JSON stable for identical inputs.

use serde::{Deserialize, Serialize};

use acadledger_core::{AccountAddress, ContentId, Expiry};

/// Placeholder used when the subject has no registered profile at
/// issuance time.
pub const UNKNOWN_SUBJECT: &str = "unknown";

/// The JSON document pinned next to a credential's supporting document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialMetadata {
    /// Display title: subject name and program.
    pub name: String,
    /// Caller-supplied description, or a synthesized one.
    pub description: String,
    /// Subject display name, or [`UNKNOWN_SUBJECT`] when unregistered.
    pub subject_name: String,
    /// Subject external id, when the profile resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_external_id: Option<String>,
    /// The subject account.
    pub subject_address: AccountAddress,
    /// The issuing account.
    pub issuer_address: AccountAddress,
    /// Free-text program name.
    pub program: String,
    /// Free-text level name.
    pub level: String,
    /// Issuance date, RFC 3339.
    pub issued_date: String,
    /// Expiry carried on the record (zero-encoded perpetual sentinel).
    pub expires_at: Expiry,
    /// Content id of the pinned supporting document.
    pub document_id: ContentId,
}
