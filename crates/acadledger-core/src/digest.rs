//! # Document Digests
//!
//! [`DocDigest`] is the 32-byte SHA-256 digest that binds an on-chain
//! credential record to its off-chain document.
//!
//! ## Commitment Invariant
//!
//! The digest commits to the content-id STRING issued by the pinning
//! service, not to the raw document bytes. The content address already
//! commits to the bytes; hashing the address keeps verification a pure
//! string recomputation, with no refetch of the document. Verifiers must
//! recompute over the same content-id string.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::content::ContentId;
use crate::error::ValidationError;

/// A 32-byte SHA-256 digest over a content-id string.
///
/// Serializes as a `0x`-prefixed lowercase hex string, the form carried
/// in ledger records and event fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocDigest([u8; 32]);

impl DocDigest {
    /// Compute the digest committing to a content identifier.
    pub fn commit_to(content_id: &ContentId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content_id.as_str().as_bytes());
        Self(hasher.finalize().into())
    }

    /// Recompute over `content_id` and compare against this digest.
    pub fn verify(&self, content_id: &ContentId) -> bool {
        Self::commit_to(content_id) == *self
    }

    /// The raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The `0x`-prefixed hex form used on the wire.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Parse 64 hex digits, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        let hex = input.strip_prefix("0x").unwrap_or(input);
        if hex.len() != 64 {
            return Err(ValidationError::InvalidDigest(input.to_string()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::InvalidDigest(input.to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| ValidationError::InvalidDigest(input.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for DocDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_prefixed_hex())
    }
}

impl Serialize for DocDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefixed_hex())
    }
}

impl<'de> Deserialize<'de> for DocDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid() -> ContentId {
        ContentId::parse("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap()
    }

    #[test]
    fn commit_is_deterministic() {
        assert_eq!(DocDigest::commit_to(&cid()), DocDigest::commit_to(&cid()));
    }

    #[test]
    fn verify_accepts_matching_content_id() {
        let digest = DocDigest::commit_to(&cid());
        assert!(digest.verify(&cid()));
    }

    #[test]
    fn verify_rejects_other_content_id() {
        let digest = DocDigest::commit_to(&cid());
        let other =
            ContentId::parse("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi")
                .unwrap();
        assert!(!digest.verify(&other));
    }

    #[test]
    fn hex_roundtrip() {
        let digest = DocDigest::commit_to(&cid());
        assert_eq!(DocDigest::from_hex(&digest.to_prefixed_hex()).unwrap(), digest);
        assert_eq!(DocDigest::from_hex(&digest.to_hex()).unwrap(), digest);
    }

    #[test]
    fn from_hex_rejects_short_and_non_hex() {
        assert!(DocDigest::from_hex("0x1234").is_err());
        assert!(DocDigest::from_hex(&"z".repeat(64)).is_err());
    }

    #[test]
    fn serde_uses_prefixed_hex() {
        let digest = DocDigest::commit_to(&cid());
        let json = serde_json::to_string(&digest).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: DocDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
