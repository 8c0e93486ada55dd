//! Credential issuance coordination.
//!
//! The flow is a linear sequence of suspend points: document pin,
//! best-effort subject lookup, metadata pin, ledger write, receipt
//! parse. A failure aborts the remaining steps and is classified by
//! the step that caused it. Content pinned before a later step fails
//! stays pinned; nothing here reconciles orphaned pins.
//!
//! ## Write-once guarantee
//!
//! Exactly one ledger broadcast is attempted per call, and it is never
//! retried. When the broadcast goes out but inclusion is not observed
//! within the bounded wait, the outcome is [`IssueError::Indeterminate`]:
//! the write may or may not have landed, and the caller must reconcile
//! with a follow-up credential listing before trying again. Retrying
//! blindly can issue a duplicate credential.

use thiserror::Error;

use acadledger_chain_client::{
    ChainClient, ChainError, CredentialIssuedEvent, TxHash, WriteOperation,
    CREDENTIAL_ISSUED_EVENT,
};
use acadledger_core::{
    AccountAddress, ContentId, CredentialId, DocDigest, Expiry, ValidationError,
};
use acadledger_pin_client::{PinClient, PinServiceError, PinTag};

use crate::directory::IdentityDirectory;
use crate::metadata::{CredentialMetadata, UNKNOWN_SUBJECT};

/// Inputs to an issuance. The subject address arrives as the raw string
/// the caller collected; validation happens before any side effect.
#[derive(Debug, Clone)]
pub struct IssuanceRequest {
    /// Subject account address, `0x` + 40 hex digits.
    pub subject: String,
    /// Free-text program name. Required.
    pub program: String,
    /// Free-text level name. Required.
    pub level: String,
    /// Expiry selector; [`Expiry::Never`] for a perpetual credential.
    pub expires_at: Expiry,
    /// The supporting document. Required, non-empty.
    pub document: Vec<u8>,
    /// File name hint for the pinned document.
    pub document_file_name: String,
    /// Optional free-text description for the off-chain metadata.
    pub description: Option<String>,
}

impl IssuanceRequest {
    /// Check every precondition and parse the subject address.
    ///
    /// Runs before any adapter call; a request that fails here has
    /// produced no side effect anywhere.
    fn validate(&self) -> Result<AccountAddress, ValidationError> {
        let subject = AccountAddress::parse(&self.subject)?;
        if self.program.trim().is_empty() {
            return Err(ValidationError::EmptyField("program"));
        }
        if self.level.trim().is_empty() {
            return Err(ValidationError::EmptyField("level"));
        }
        if self.document.is_empty() {
            return Err(ValidationError::MissingDocument);
        }
        Ok(subject)
    }
}

/// Result of a successful issuance.
#[derive(Debug, Clone)]
pub struct IssuanceOutcome {
    /// The ledger-assigned id, when the issuance event was present in
    /// the receipt. `None` means the write landed but the id must be
    /// discovered through a follow-up credential listing.
    pub credential_id: Option<CredentialId>,
    /// Content id of the pinned supporting document.
    pub document_id: ContentId,
    /// Content id of the pinned metadata document.
    pub metadata_id: ContentId,
    /// The digest recorded on-chain, committing to `document_id`.
    pub document_hash: DocDigest,
    /// Hash of the including transaction.
    pub tx_hash: TxHash,
}

/// Issuance failure, classified by the step that caused it.
#[derive(Debug, Error)]
pub enum IssueError {
    /// A precondition failed; nothing was uploaded or written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The supporting document could not be pinned.
    #[error("document upload failed")]
    DocumentUpload(#[source] PinServiceError),

    /// The metadata document could not be pinned. The supporting
    /// document stays pinned.
    #[error("metadata upload failed")]
    MetadataUpload(#[source] PinServiceError),

    /// The ledger write failed before or at inclusion: network
    /// mismatch, broadcast transport failure, or revert.
    #[error("ledger write failed")]
    Submit(#[source] ChainError),

    /// The write was broadcast but its inclusion was not observed in
    /// time. The credential may or may not exist; reconcile with a
    /// credential listing for the subject before retrying.
    #[error("transaction {tx_hash} broadcast but unconfirmed after {waited_secs}s")]
    Indeterminate {
        /// Hash of the broadcast transaction.
        tx_hash: TxHash,
        /// How long inclusion was awaited.
        waited_secs: u64,
    },
}

/// Orchestrates document pinning and the issuance write.
#[derive(Debug, Clone)]
pub struct IssuanceCoordinator {
    pin: PinClient,
    chain: ChainClient,
    directory: IdentityDirectory,
}

impl IssuanceCoordinator {
    /// Build a coordinator over the two adapter clients.
    pub fn new(pin: PinClient, chain: ChainClient) -> Self {
        let directory = IdentityDirectory::new(chain.clone());
        Self {
            pin,
            chain,
            directory,
        }
    }

    /// Issue a credential.
    pub async fn issue(&self, request: IssuanceRequest) -> Result<IssuanceOutcome, IssueError> {
        let subject = request.validate()?;
        tracing::info!(subject = %subject.short(), program = %request.program, "issuing credential");

        // Pin the supporting document.
        let doc_tag = PinTag::named(format!(
            "credential-{}-{}",
            subject.short(),
            request.document_file_name
        ))
        .with("subject", subject.as_str())
        .with("program", request.program.clone())
        .with("type", "credential-document");
        let document_receipt = self
            .pin
            .pin_bytes(request.document, &request.document_file_name, doc_tag)
            .await
            .map_err(IssueError::DocumentUpload)?;
        let document_id = document_receipt.content_id;

        // Best-effort subject profile. Absence, or any failure, records
        // the subject as unknown and never aborts the flow.
        let profile = match self.directory.subject(&subject).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(subject = %subject.short(), error = %e, "subject profile unresolved");
                None
            }
        };

        // Pin the metadata document.
        let subject_name = profile
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());
        let metadata = CredentialMetadata {
            name: format!("{subject_name} - {}", request.program),
            description: request
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| format!("{} credential in {}", request.level, request.program)),
            subject_name,
            subject_external_id: profile.as_ref().map(|p| p.external_id.clone()),
            subject_address: subject.clone(),
            issuer_address: self.chain.account().clone(),
            program: request.program.clone(),
            level: request.level.clone(),
            issued_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            expires_at: request.expires_at,
            document_id: document_id.clone(),
        };
        let meta_tag = PinTag::named(format!("credential-{}-metadata", subject.short()))
            .with("subject", subject.as_str())
            .with("type", "credential-metadata");
        let metadata_receipt = self
            .pin
            .pin_json(&metadata, meta_tag)
            .await
            .map_err(IssueError::MetadataUpload)?;

        // The on-chain digest commits to the document's content id.
        let document_hash = DocDigest::commit_to(&document_id);

        // Verify the network, then broadcast. At most one broadcast per
        // call; an inclusion timeout is a distinct outcome because the
        // write may still land.
        self.chain
            .ensure_network()
            .await
            .map_err(IssueError::Submit)?;
        let operation = WriteOperation::IssueCredential {
            subject: subject.clone(),
            program: request.program,
            level: request.level,
            expires_at: request.expires_at.as_unix(),
            uri: document_id.to_uri(),
            document_hash,
        };
        let receipt = match self.chain.submit(&operation).await {
            Ok(receipt) => receipt,
            Err(ChainError::Timeout {
                tx_hash,
                waited_secs,
            }) => {
                return Err(IssueError::Indeterminate {
                    tx_hash,
                    waited_secs,
                })
            }
            Err(e) => return Err(IssueError::Submit(e)),
        };

        // Extract the assigned id. A receipt without the issuance event
        // still changed ledger state; report success with the id
        // unknown rather than inventing a failure.
        let credential_id = match receipt.event(CREDENTIAL_ISSUED_EVENT) {
            Some(event) => match event.decode::<CredentialIssuedEvent>() {
                Ok(decoded) => Some(decoded.id),
                Err(e) => {
                    tracing::warn!(tx_hash = %receipt.tx_hash, error = %e,
                        "issuance event present but undecodable; id unknown");
                    None
                }
            },
            None => {
                tracing::warn!(tx_hash = %receipt.tx_hash,
                    "issuance event missing from receipt; id unknown");
                None
            }
        };

        if let Some(id) = credential_id {
            tracing::info!(%id, subject = %subject.short(), "credential issued");
        }

        Ok(IssuanceOutcome {
            credential_id,
            document_id,
            metadata_id: metadata_receipt.content_id,
            document_hash,
            tx_hash: receipt.tx_hash,
        })
    }
}
