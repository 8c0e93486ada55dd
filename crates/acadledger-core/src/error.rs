//! # Validation Errors
//!
//! Structured input-validation errors, built with `thiserror`. Every
//! variant carries the rejected input and the expected format so that
//! operators can diagnose bad requests without guesswork.
//!
//! Validation failures are raised before any adapter call is made; a
//! request that fails validation has produced no side effect anywhere.

use thiserror::Error;

/// Errors for malformed inputs, caught before any side effect.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Account address is not `0x` followed by exactly 40 hex digits.
    #[error("invalid account address: \"{0}\" (expected 0x followed by 40 hex digits)")]
    InvalidAddress(String),

    /// Content identifier does not match a known CID form.
    #[error("invalid content identifier: \"{0}\" (expected Qm… CIDv0 or baf… CIDv1)")]
    InvalidContentId(String),

    /// Document digest string is not a 32-byte hex value.
    #[error("invalid document digest: \"{0}\" (expected 64 hex digits, optionally 0x-prefixed)")]
    InvalidDigest(String),

    /// Credential identifiers are ledger-assigned positive integers;
    /// zero is the legacy "id unknown" sentinel and never names a record.
    #[error("credential id must be a positive integer")]
    ZeroCredentialId,

    /// A required free-text field was empty or whitespace.
    #[error("required field \"{0}\" must be non-empty")]
    EmptyField(&'static str),

    /// Issuance requires a supporting document.
    #[error("supporting document is required and was empty")]
    MissingDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_display_names_the_input() {
        let err = ValidationError::InvalidAddress("0x12".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("0x12"));
        assert!(msg.contains("40 hex digits"));
    }

    #[test]
    fn empty_field_display_names_the_field() {
        let err = ValidationError::EmptyField("program");
        assert!(format!("{err}").contains("program"));
    }

    #[test]
    fn zero_credential_id_display() {
        let err = ValidationError::ZeroCredentialId;
        assert!(format!("{err}").contains("positive"));
    }
}
