//! Credential listing with per-record enrichment.
//!
//! The aggregator fetches every credential id the ledger reports for a
//! principal, joins each record with the counterpart identity, and
//! returns the entries in the ledger's id order. Individual records and
//! joins degrade in place: a fetch failure becomes a placeholder entry,
//! an unresolvable counterpart becomes an "unregistered" marker. The
//! whole call fails only when the principal address is malformed or the
//! initial id-list read fails outright.
//!
//! Per-id lookups fan out across a small bounded pool; results are
//! reassembled into ledger order before returning. Dropping the
//! returned future cancels the aggregation at the next suspension
//! point. No lookup mutates anything, so cancellation is always safe.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;

use acadledger_chain_client::{ChainClient, ChainError};
use acadledger_core::{
    AccountAddress, ContentId, CredentialId, CredentialRecord, InstitutionRecord, SubjectRecord,
    ValidationError,
};

use crate::directory::IdentityDirectory;

/// Which side of the credential the principal is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalRole {
    /// List credentials held by the principal.
    Subject,
    /// List credentials issued by the principal.
    Issuer,
}

/// The counterpart identity joined onto a fetched record.
#[derive(Debug, Clone)]
pub enum Counterpart {
    /// The issuing institution, for a subject's listing.
    Institution(InstitutionRecord),
    /// The credential holder, for an issuer's listing.
    Subject(SubjectRecord),
    /// The counterpart address has no resolvable registration. Rendered
    /// distinctly; never an error for the entry.
    Unregistered {
        /// The unresolvable address.
        address: AccountAddress,
    },
}

impl Counterpart {
    /// Display name for listings, with the unregistered marker.
    pub fn display_name(&self) -> String {
        match self {
            Self::Institution(inst) => inst.name.clone(),
            Self::Subject(subj) => subj.name.clone(),
            Self::Unregistered { address } => format!("unregistered ({})", address.short()),
        }
    }
}

/// A fully fetched and joined credential.
#[derive(Debug, Clone)]
pub struct ResolvedCredential {
    /// The on-chain record.
    pub record: CredentialRecord,
    /// The joined counterpart identity.
    pub counterpart: Counterpart,
    /// Content reference parsed from the record's document URI, when it
    /// carries the content-address scheme. Nothing is fetched eagerly;
    /// consumers resolve the preview on demand.
    pub document_ref: Option<ContentId>,
}

/// One entry in a principal's credential listing.
#[derive(Debug, Clone)]
pub enum CredentialEntry {
    /// The record fetched and joined.
    Resolved(Box<ResolvedCredential>),
    /// The record could not be fetched; the listing keeps its place.
    Unavailable {
        /// The id that failed to fetch.
        id: CredentialId,
        /// Description of the failing lookup.
        error: String,
    },
}

impl CredentialEntry {
    /// The credential id this entry stands for.
    pub fn id(&self) -> CredentialId {
        match self {
            Self::Resolved(resolved) => resolved.record.id,
            Self::Unavailable { id, .. } => *id,
        }
    }

    /// Whether the record was fetched successfully.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Errors that fail a listing outright.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The principal address was malformed; nothing was queried.
    #[error(transparent)]
    InvalidPrincipal(#[from] ValidationError),

    /// The initial id-list read failed.
    #[error("credential id listing failed")]
    IdList(#[source] ChainError),
}

/// Default per-call concurrency for record lookups.
const DEFAULT_CONCURRENCY: usize = 6;

/// Fetches and enriches credential listings.
#[derive(Debug, Clone)]
pub struct QueryAggregator {
    chain: ChainClient,
    directory: IdentityDirectory,
    concurrency: usize,
}

impl QueryAggregator {
    /// Build an aggregator over a gateway client.
    pub fn new(chain: ChainClient) -> Self {
        let directory = IdentityDirectory::new(chain.clone());
        Self {
            chain,
            directory,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Override the lookup concurrency, clamped to 1..=8.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 8);
        self
    }

    /// List and enrich every credential for a principal.
    ///
    /// Returns entries in the ledger's id order. A principal with no
    /// credentials yields an empty vector.
    pub async fn list_for_principal(
        &self,
        principal: &str,
        role: PrincipalRole,
    ) -> Result<Vec<CredentialEntry>, QueryError> {
        let principal = AccountAddress::parse(principal)?;

        let ids = match role {
            PrincipalRole::Subject => self.chain.credentials_of(&principal).await,
            PrincipalRole::Issuer => self.chain.credentials_by_issuer(&principal).await,
        }
        .map_err(QueryError::IdList)?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(principal = %principal.short(), count = ids.len(), "enriching listing");

        // Fan out bounded lookups; awaiting the handles in spawn order
        // reassembles the ledger's ordering.
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(ids.len());
        for id in &ids {
            let id = *id;
            let chain = self.chain.clone();
            let directory = self.directory.clone();
            let semaphore = semaphore.clone();
            handles.push(tokio::spawn(async move {
                // The semaphore is never closed; if acquisition ever
                // fails the lookup just runs unbounded.
                let _permit = semaphore.acquire_owned().await.ok();
                resolve_entry(&chain, &directory, id, role).await
            }));
        }

        let mut entries = Vec::with_capacity(ids.len());
        for (id, handle) in ids.into_iter().zip(handles) {
            match handle.await {
                Ok(entry) => entries.push(entry),
                Err(join_error) => entries.push(CredentialEntry::Unavailable {
                    id,
                    error: format!("lookup task failed: {join_error}"),
                }),
            }
        }
        Ok(entries)
    }
}

/// Fetch one record and join its counterpart identity.
async fn resolve_entry(
    chain: &ChainClient,
    directory: &IdentityDirectory,
    id: CredentialId,
    role: PrincipalRole,
) -> CredentialEntry {
    let record = match chain.credential(id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(%id, error = %e, "credential fetch failed");
            return CredentialEntry::Unavailable {
                id,
                error: e.to_string(),
            };
        }
    };

    let counterpart = match role {
        PrincipalRole::Subject => {
            match directory.institution(&record.issuer).await {
                Ok(institution) => Counterpart::Institution(institution),
                Err(e) => {
                    if !e.is_not_registered() {
                        tracing::debug!(%id, error = %e, "issuer join failed");
                    }
                    Counterpart::Unregistered {
                        address: record.issuer.clone(),
                    }
                }
            }
        }
        PrincipalRole::Issuer => match directory.subject(&record.subject).await {
            Ok(subject) => Counterpart::Subject(subject),
            Err(e) => {
                if !e.is_not_registered() {
                    tracing::debug!(%id, error = %e, "subject join failed");
                }
                Counterpart::Unregistered {
                    address: record.subject.clone(),
                }
            }
        },
    };

    let document_ref = ContentId::from_uri(&record.document_uri);

    CredentialEntry::Resolved(Box::new(ResolvedCredential {
        record,
        counterpart,
        document_ref,
    }))
}
