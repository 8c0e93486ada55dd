//! Write operations, receipts, and event extraction.
//!
//! Every write the gateway can sign is a [`WriteOperation`] variant;
//! the JSON encoding carries an `op` tag so the gateway dispatches on a
//! single field. Receipts carry the decoded event log so callers can
//! extract assigned identifiers without a second round trip.

use serde::{Deserialize, Serialize};

use acadledger_core::{AccountAddress, CredentialId, DocDigest};

/// Hash of a broadcast transaction, as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// The raw hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A capability class the ledger's access control can be probed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May register institutions and subjects.
    Admin,
    /// May issue credentials.
    Issuer,
}

impl Capability {
    /// The path segment used by the gateway's capability-check read.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Issuer => "issuer",
        }
    }
}

/// A write operation submitted to the gateway for signing and broadcast.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WriteOperation {
    /// Issue a credential to a subject.
    IssueCredential {
        /// The subject account.
        subject: AccountAddress,
        /// Free-text program name.
        program: String,
        /// Free-text level name.
        level: String,
        /// Expiry in unix seconds; zero means never.
        expires_at: u64,
        /// Content-address URI of the supporting document, or empty.
        uri: String,
        /// Digest committing the record to the document's content id.
        document_hash: DocDigest,
    },
    /// Register (or overwrite) an institution identity record.
    RegisterInstitution {
        /// The institution account.
        institution: AccountAddress,
        /// Display name.
        name: String,
        /// Optional supplementary metadata URI.
        metadata_uri: String,
    },
    /// Register (or overwrite) a subject identity record.
    RegisterSubject {
        /// The subject account.
        subject: AccountAddress,
        /// Display name.
        name: String,
        /// Institution-scoped external identifier.
        external_id: String,
        /// Optional supplementary metadata URI.
        metadata_uri: String,
    },
    /// Flip a subject's active flag.
    SetSubjectStatus {
        /// The subject account.
        subject: AccountAddress,
        /// New active state.
        active: bool,
    },
    /// Amend a credential's document URI.
    UpdateCredentialUri {
        /// The credential to amend.
        id: CredentialId,
        /// Replacement URI.
        new_uri: String,
    },
}

impl WriteOperation {
    /// Stable operation name, used in error context and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IssueCredential { .. } => "issueCredential",
            Self::RegisterInstitution { .. } => "registerInstitution",
            Self::RegisterSubject { .. } => "registerSubject",
            Self::SetSubjectStatus { .. } => "setSubjectStatus",
            Self::UpdateCredentialUri { .. } => "updateCredentialUri",
        }
    }
}

/// A decoded event from a transaction's log set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name as emitted by the ledger contract.
    pub name: String,
    /// Decoded event fields.
    #[serde(default)]
    pub fields: serde_json::Value,
}

impl EventRecord {
    /// Decode the fields into a typed event struct.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.fields.clone())
    }
}

/// Inclusion receipt for a broadcast transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Hash of the included transaction.
    pub tx_hash: TxHash,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_number: u64,
    /// Decoded events emitted during execution.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl Receipt {
    /// Find a named event in the log set.
    ///
    /// Returns `None` when the event is absent. A write can succeed
    /// without emitting the expected event under degenerate conditions;
    /// callers must surface that case rather than treat it as failure.
    pub fn event(&self, name: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// Fields of the `CredentialIssued` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialIssuedEvent {
    /// The ledger-assigned credential id.
    pub id: CredentialId,
    /// The subject the credential was issued to.
    pub subject: AccountAddress,
    /// The issuing institution.
    pub issuer: AccountAddress,
    /// Digest carried in the record.
    pub document_hash: DocDigest,
}

/// Name of the event emitted by a successful issuance.
pub const CREDENTIAL_ISSUED_EVENT: &str = "CredentialIssued";

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(fill: char) -> AccountAddress {
        AccountAddress::parse(&format!("0x{}", fill.to_string().repeat(40))).unwrap()
    }

    #[test]
    fn write_operation_serializes_with_op_tag() {
        let op = WriteOperation::SetSubjectStatus {
            subject: addr('a'),
            active: false,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "setSubjectStatus");
        assert_eq!(json["active"], false);
    }

    #[test]
    fn issue_operation_uses_camel_case_fields() {
        let cid = acadledger_core::ContentId::parse(
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
        )
        .unwrap();
        let op = WriteOperation::IssueCredential {
            subject: addr('a'),
            program: "Computer Science".into(),
            level: "Bachelor".into(),
            expires_at: 0,
            uri: cid.to_uri(),
            document_hash: DocDigest::commit_to(&cid),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "issueCredential");
        assert_eq!(json["expiresAt"], 0);
        assert!(json["documentHash"].as_str().unwrap().starts_with("0x"));
        assert_eq!(op.name(), "issueCredential");
    }

    #[test]
    fn receipt_event_lookup_finds_by_name() {
        let receipt: Receipt = serde_json::from_value(serde_json::json!({
            "txHash": "0xabc",
            "blockNumber": 12,
            "events": [
                {"name": "Unrelated", "fields": {}},
                {"name": "CredentialIssued", "fields": {
                    "id": 42,
                    "subject": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    "issuer": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                    "documentHash": format!("0x{}", "cd".repeat(32)),
                }},
            ]
        }))
        .unwrap();

        let event = receipt.event(CREDENTIAL_ISSUED_EVENT).unwrap();
        let decoded: CredentialIssuedEvent = event.decode().unwrap();
        assert_eq!(decoded.id.value(), 42);
    }

    #[test]
    fn receipt_event_lookup_returns_none_when_absent() {
        let receipt: Receipt = serde_json::from_value(serde_json::json!({
            "txHash": "0xabc",
            "events": []
        }))
        .unwrap();
        assert!(receipt.event(CREDENTIAL_ISSUED_EVENT).is_none());
    }
}
