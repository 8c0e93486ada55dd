//! # Credential and Identity Records
//!
//! Wire-shaped record types for the ledger's read surface. Field names
//! follow the gateway's camelCase JSON; optional fields use
//! `#[serde(default)]` so schema evolution on the gateway side does not
//! break deserialization (`deny_unknown_fields` is intentionally not
//! used).

use serde::{Deserialize, Serialize};

use crate::address::AccountAddress;
use crate::digest::DocDigest;
use crate::error::ValidationError;

/// Ledger-assigned credential identifier. Positive, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(u64);

impl CredentialId {
    /// Wrap a ledger-assigned identifier, rejecting the zero sentinel.
    pub fn new(raw: u64) -> Result<Self, ValidationError> {
        if raw == 0 {
            return Err(ValidationError::ZeroCredentialId);
        }
        Ok(Self(raw))
    }

    /// The numeric identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credential expiry: the ledger encodes "never expires" as zero.
///
/// Advisory display semantics only; no validity computation happens in
/// this stack beyond formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    /// The zero sentinel: the credential never expires.
    Never,
    /// Unix-seconds expiry timestamp.
    At(u64),
}

impl Expiry {
    /// Decode the on-wire `u64` encoding.
    pub fn from_unix(raw: u64) -> Self {
        if raw == 0 {
            Self::Never
        } else {
            Self::At(raw)
        }
    }

    /// The on-wire `u64` encoding (zero for [`Expiry::Never`]).
    pub fn as_unix(&self) -> u64 {
        match self {
            Self::Never => 0,
            Self::At(ts) => *ts,
        }
    }

    /// Whether this is the perpetual sentinel.
    pub fn is_perpetual(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl Serialize for Expiry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_unix())
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_unix(u64::deserialize(deserializer)?))
    }
}

/// An on-chain credential record, immutable once issued apart from the
/// explicit document-URI update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Ledger-assigned identifier.
    pub id: CredentialId,
    /// The account the credential was issued to.
    pub subject: AccountAddress,
    /// The institution account that issued it.
    pub issuer: AccountAddress,
    /// Free-text program name.
    pub program: String,
    /// Free-text level / degree name.
    pub level: String,
    /// Ledger-assigned issuance time, unix seconds.
    pub issued_at: u64,
    /// Expiry, with zero as the perpetual sentinel.
    pub expires_at: Expiry,
    /// Content-address reference to the supporting document, or empty.
    #[serde(default)]
    pub document_uri: String,
    /// Digest committing this record to the document's content id.
    pub document_hash: DocDigest,
}

/// An institution identity record from the ledger.
///
/// The raw read surface returns only name and metadata URI; the address
/// is attached by the resolver that performed the lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionRecord {
    /// The institution's account address.
    pub address: AccountAddress,
    /// Registered display name. Never empty once resolved; an empty name
    /// on the wire means "not registered".
    pub name: String,
    /// Optional pointer to supplementary content-addressed data.
    #[serde(default)]
    pub metadata_uri: String,
}

/// A subject identity record from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    /// The subject's account address.
    pub address: AccountAddress,
    /// Registered display name. Never empty once resolved.
    pub name: String,
    /// Institution-scoped external identifier (e.g. a student number).
    #[serde(default)]
    pub external_id: String,
    /// Optional pointer to supplementary content-addressed data.
    #[serde(default)]
    pub metadata_uri: String,
    /// Registered-but-inactive is a distinct state from unregistered.
    pub active: bool,
    /// Registration time, unix seconds.
    pub registered_at: u64,
}
