//! # Account Addresses
//!
//! [`AccountAddress`] wraps the opaque account identifiers used by the
//! ledger: `0x` followed by exactly 40 hex digits. Input is accepted
//! case-insensitively and normalized to lowercase so that two spellings
//! of the same account compare equal.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A ledger account address: `0x` + 40 hex digits, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and normalize an account address.
    ///
    /// Accepts mixed case; rejects anything that is not `0x` followed by
    /// exactly 40 hexadecimal characters.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ValidationError::InvalidAddress(input.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress(input.to_string()));
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// The normalized `0x…` string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated display form: first 6 and last 4 characters
    /// (`0x1234…abcd`), for logs and human-facing listings.
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_and_lowercases_mixed_case() {
        let addr = AccountAddress::parse("0xAbCdEf0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(AccountAddress::parse("abcdef0123456789abcdef0123456789abcdef01").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(AccountAddress::parse("0xabc").is_err());
        assert!(AccountAddress::parse(&format!("0x{}", "a".repeat(41))).is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(AccountAddress::parse(&format!("0x{}", "g".repeat(40))).is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let addr = AccountAddress::parse(&format!("  0x{}  ", "a".repeat(40))).unwrap();
        assert_eq!(addr.as_str(), &format!("0x{}", "a".repeat(40)));
    }

    #[test]
    fn short_form_keeps_prefix_and_tail() {
        let addr = AccountAddress::parse(&format!("0x{}", "a".repeat(40))).unwrap();
        assert_eq!(addr.short(), "0xaaaa…aaaa");
    }

    proptest! {
        #[test]
        fn any_40_hex_digits_parse(hex in "[0-9a-fA-F]{40}") {
            let addr = AccountAddress::parse(&format!("0x{hex}")).unwrap();
            prop_assert_eq!(addr.as_str(), format!("0x{}", hex.to_ascii_lowercase()));
        }

        #[test]
        fn wrong_lengths_never_parse(hex in "[0-9a-f]{0,39}") {
            let candidate = format!("0x{}", hex);
            prop_assert!(AccountAddress::parse(&candidate).is_err());
        }
    }
}
