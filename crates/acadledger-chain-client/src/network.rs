//! Network verification and switching.

use serde::Deserialize;

use crate::error::ChainError;
use crate::ChainClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainInfo {
    chain_id: u64,
}

impl ChainClient {
    /// The chain id the gateway is currently connected to.
    ///
    /// Calls `GET {gateway}/v1/chain`.
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let endpoint = "GET /v1/chain";
        let url = format!("{}v1/chain", self.gateway());

        let resp = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| ChainError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChainError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let info: ChainInfo = resp.json().await.map_err(|e| ChainError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        Ok(info.chain_id)
    }

    /// Verify the gateway is on the expected chain, asking it to switch
    /// if it is not.
    ///
    /// A declined or unavailable switch, or a switch that lands on the
    /// wrong chain anyway, surfaces as [`ChainError::NetworkMismatch`].
    pub async fn ensure_network(&self) -> Result<(), ChainError> {
        let actual = self.chain_id().await?;
        if actual == self.expected_chain_id() {
            return Ok(());
        }

        tracing::info!(
            expected = self.expected_chain_id(),
            actual,
            "chain mismatch, requesting switch"
        );

        let endpoint = "POST /v1/chain/switch";
        let url = format!("{}v1/chain/switch", self.gateway());
        let resp = self
            .http()
            .post(&url)
            .json(&serde_json::json!({ "chainId": self.expected_chain_id() }))
            .send()
            .await
            .map_err(|e| ChainError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(ChainError::NetworkMismatch {
                expected: self.expected_chain_id(),
                actual,
            });
        }

        // Re-read after the switch; a gateway that accepted the request
        // but stayed on the wrong chain is still a mismatch.
        let after = self.chain_id().await?;
        if after != self.expected_chain_id() {
            return Err(ChainError::NetworkMismatch {
                expected: self.expected_chain_id(),
                actual: after,
            });
        }
        Ok(())
    }
}
