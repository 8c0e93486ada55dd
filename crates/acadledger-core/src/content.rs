//! # Content Identifiers
//!
//! [`ContentId`] wraps the identifiers issued by the content-addressed
//! pinning service. Two forms are accepted: CIDv0 (`Qm…`, 46 characters)
//! and CIDv1 (`baf…`). On-chain records reference content through the
//! `ipfs://<cid>` URI form; parsing accepts and strips that prefix.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// URI scheme used for content-address references in on-chain records.
pub const CONTENT_URI_SCHEME: &str = "ipfs";

/// A content identifier from the pinning service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Parse a content identifier, stripping an optional `ipfs://` prefix.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim();
        let raw = raw.strip_prefix("ipfs://").unwrap_or(raw);
        let v0 = raw.starts_with("Qm") && raw.len() == 46;
        let v1 = raw.starts_with("baf") && raw.len() > 10;
        if !(v0 || v1) || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidContentId(input.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// The bare identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `ipfs://<cid>` URI form recorded on-chain.
    pub fn to_uri(&self) -> String {
        format!("{CONTENT_URI_SCHEME}://{}", self.0)
    }

    /// Parse a content reference out of a record's document URI.
    ///
    /// Returns `None` for empty URIs, foreign schemes, and malformed
    /// identifiers; callers treat those records as having no resolvable
    /// document preview.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("ipfs://")?;
        Self::parse(rest).ok()
    }

    /// Abbreviated display form: 10 leading and 8 trailing characters.
    pub fn short(&self) -> String {
        if self.0.len() <= 21 {
            return self.0.clone();
        }
        format!("{}…{}", &self.0[..10], &self.0[self.0.len() - 8..])
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
