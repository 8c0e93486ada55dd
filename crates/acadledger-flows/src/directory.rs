//! Identity resolution over the ledger's read surface.
//!
//! The ledger encodes "never registered" as a record whose name is
//! empty. The directory normalizes that encoding into an explicit
//! [`DirectoryError::NotRegistered`] so no caller can mistake an
//! unregistered address for a registration with a blank name.

use thiserror::Error;

use acadledger_chain_client::{ChainClient, ChainError};
use acadledger_core::{AccountAddress, InstitutionRecord, SubjectRecord};

/// Errors from identity resolution.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The address has no identity record on the ledger. Expected, not
    /// exceptional: unregistered counterparties are a normal state.
    #[error("{address} is not registered")]
    NotRegistered {
        /// The unregistered address.
        address: AccountAddress,
    },

    /// The underlying ledger read failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl DirectoryError {
    /// Whether this is the expected "no such registration" outcome, as
    /// opposed to an infrastructure failure.
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }
}

/// Resolves institution and subject profiles from ledger state.
#[derive(Debug, Clone)]
pub struct IdentityDirectory {
    chain: ChainClient,
}

impl IdentityDirectory {
    /// Build a directory over a gateway client.
    pub fn new(chain: ChainClient) -> Self {
        Self { chain }
    }

    /// Resolve an institution profile.
    pub async fn institution(
        &self,
        address: &AccountAddress,
    ) -> Result<InstitutionRecord, DirectoryError> {
        let state = self.chain.institution(address).await?;
        let name = state.name.trim();
        if name.is_empty() {
            return Err(DirectoryError::NotRegistered {
                address: address.clone(),
            });
        }
        Ok(InstitutionRecord {
            address: address.clone(),
            name: name.to_string(),
            metadata_uri: state.metadata_uri,
        })
    }

    /// Resolve a subject profile.
    pub async fn subject(
        &self,
        address: &AccountAddress,
    ) -> Result<SubjectRecord, DirectoryError> {
        let state = self.chain.subject(address).await?;
        let name = state.name.trim();
        if name.is_empty() {
            return Err(DirectoryError::NotRegistered {
                address: address.clone(),
            });
        }
        Ok(SubjectRecord {
            address: address.clone(),
            name: name.to_string(),
            external_id: state.external_id,
            metadata_uri: state.metadata_uri,
            active: state.active,
            registered_at: state.registered_at,
        })
    }
}
