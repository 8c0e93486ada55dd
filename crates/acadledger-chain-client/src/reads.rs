//! Typed reads against current ledger state.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v1/credentials/{id}` | Fetch a credential record |
//! | GET    | `/v1/subjects/{addr}/credentials` | Ids held by a subject |
//! | GET    | `/v1/institutions/{addr}/credentials` | Ids issued by an institution |
//! | GET    | `/v1/institutions/{addr}` | Institution identity state |
//! | GET    | `/v1/subjects/{addr}` | Subject identity state |
//! | GET    | `/v1/capabilities/{cap}/{addr}` | Capability probe |
//!
//! Each query has exactly one response shape; normalization happens here
//! at the adapter boundary, never at call sites. Identity reads return
//! the ledger's raw state, where an empty name encodes "not registered";
//! turning that into an explicit error is the resolver's job one layer up.

use serde::Deserialize;

use acadledger_core::{AccountAddress, CredentialId, CredentialRecord};

use crate::error::ChainError;
use crate::operation::Capability;
use crate::ChainClient;

/// Raw institution state from the ledger. An empty `name` means the
/// address has never been registered.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionState {
    /// Registered display name, or empty.
    #[serde(default)]
    pub name: String,
    /// Supplementary metadata URI, or empty.
    #[serde(default)]
    pub metadata_uri: String,
}

/// Raw subject state from the ledger. An empty `name` means the address
/// has never been registered.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectState {
    /// Registered display name, or empty.
    #[serde(default)]
    pub name: String,
    /// Institution-scoped external identifier, or empty.
    #[serde(default)]
    pub external_id: String,
    /// Supplementary metadata URI, or empty.
    #[serde(default)]
    pub metadata_uri: String,
    /// Active flag; meaningful only for registered subjects.
    #[serde(default)]
    pub active: bool,
    /// Registration time, unix seconds; zero when unregistered.
    #[serde(default)]
    pub registered_at: u64,
}

#[derive(Debug, Deserialize)]
struct CapabilityGrant {
    granted: bool,
}

impl ChainClient {
    /// Fetch a credential record by id.
    ///
    /// Calls `GET {gateway}/v1/credentials/{id}`. Reading an id that was
    /// never issued reverts on the ledger and surfaces as
    /// [`ChainError::CallReverted`].
    pub async fn credential(&self, id: CredentialId) -> Result<CredentialRecord, ChainError> {
        let endpoint = format!("GET /v1/credentials/{id}");
        let url = format!("{}v1/credentials/{id}", self.gateway());
        self.get_json(&url, endpoint).await
    }

    /// Ids of all credentials held by a subject, in ledger order.
    ///
    /// Calls `GET {gateway}/v1/subjects/{addr}/credentials`. An address
    /// with no credentials yields an empty list, not an error.
    pub async fn credentials_of(
        &self,
        subject: &AccountAddress,
    ) -> Result<Vec<CredentialId>, ChainError> {
        let endpoint = format!("GET /v1/subjects/{subject}/credentials");
        let url = format!("{}v1/subjects/{subject}/credentials", self.gateway());
        self.get_json(&url, endpoint).await
    }

    /// Ids of all credentials issued by an institution, in ledger order.
    ///
    /// Calls `GET {gateway}/v1/institutions/{addr}/credentials`.
    pub async fn credentials_by_issuer(
        &self,
        issuer: &AccountAddress,
    ) -> Result<Vec<CredentialId>, ChainError> {
        let endpoint = format!("GET /v1/institutions/{issuer}/credentials");
        let url = format!("{}v1/institutions/{issuer}/credentials", self.gateway());
        self.get_json(&url, endpoint).await
    }

    /// Raw institution identity state.
    ///
    /// Calls `GET {gateway}/v1/institutions/{addr}`.
    pub async fn institution(
        &self,
        address: &AccountAddress,
    ) -> Result<InstitutionState, ChainError> {
        let endpoint = format!("GET /v1/institutions/{address}");
        let url = format!("{}v1/institutions/{address}", self.gateway());
        self.get_json(&url, endpoint).await
    }

    /// Raw subject identity state.
    ///
    /// Calls `GET {gateway}/v1/subjects/{addr}`.
    pub async fn subject(&self, address: &AccountAddress) -> Result<SubjectState, ChainError> {
        let endpoint = format!("GET /v1/subjects/{address}");
        let url = format!("{}v1/subjects/{address}", self.gateway());
        self.get_json(&url, endpoint).await
    }

    /// Probe whether an account holds a capability.
    ///
    /// Calls `GET {gateway}/v1/capabilities/{cap}/{addr}`.
    pub async fn has_capability(
        &self,
        capability: Capability,
        address: &AccountAddress,
    ) -> Result<bool, ChainError> {
        let endpoint = format!("GET /v1/capabilities/{}/{address}", capability.as_str());
        let url = format!(
            "{}v1/capabilities/{}/{address}",
            self.gateway(),
            capability.as_str()
        );
        let grant: CapabilityGrant = self.get_json(&url, endpoint).await?;
        Ok(grant.granted)
    }

    /// Shared GET-and-decode with the read error mapping: 404/409 carry
    /// a revert reason, everything else non-2xx is a gateway failure.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        endpoint: String,
    ) -> Result<T, ChainError> {
        let resp = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| ChainError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::CONFLICT {
            let reason = resp.text().await.unwrap_or_default();
            return Err(ChainError::CallReverted {
                endpoint,
                reason: if reason.is_empty() {
                    "call reverted".to_string()
                } else {
                    reason
                },
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChainError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| ChainError::Deserialization {
            endpoint,
            source: e,
        })
    }
}
