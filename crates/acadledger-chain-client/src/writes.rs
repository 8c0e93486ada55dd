//! Write submission: sign, broadcast, and wait for inclusion.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/v1/transactions` | Sign and broadcast a write |
//! | GET    | `/v1/transactions/{txHash}/receipt` | Poll for inclusion |
//!
//! One `submit` call broadcasts at most once. The inclusion wait polls
//! the receipt endpoint (404 = still pending) until the configured
//! deadline; exceeding it yields [`ChainError::Timeout`] carrying the
//! transaction hash, never a silent retry.

use serde::Deserialize;
use tokio::time::Instant;

use crate::error::ChainError;
use crate::operation::{Receipt, TxHash, WriteOperation};
use crate::ChainClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastResponse {
    tx_hash: TxHash,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptEnvelope {
    status: ReceiptStatus,
    #[serde(default)]
    revert_reason: Option<String>,
    #[serde(flatten)]
    receipt: Receipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ReceiptStatus {
    Included,
    Reverted,
}

impl ChainClient {
    /// Submit a write operation and wait for its inclusion receipt.
    ///
    /// Suspends until the gateway reports inclusion, the ledger reports
    /// a revert, or the bounded wait elapses.
    pub async fn submit(&self, operation: &WriteOperation) -> Result<Receipt, ChainError> {
        let endpoint = "POST /v1/transactions";
        let url = format!("{}v1/transactions", self.gateway());

        tracing::debug!(operation = operation.name(), from = %self.account(), "broadcasting write");

        let resp = self
            .http()
            .post(&url)
            .json(&serde_json::json!({
                "from": self.account(),
                "operation": operation,
            }))
            .send()
            .await
            .map_err(|e| ChainError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            // The gateway pre-validated the operation against current
            // state and the ledger would reject it.
            let reason = resp.text().await.unwrap_or_default();
            return Err(ChainError::Reverted {
                operation: operation.name().to_string(),
                reason,
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChainError::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        let broadcast: BroadcastResponse =
            resp.json().await.map_err(|e| ChainError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        self.wait_for_receipt(operation.name(), broadcast.tx_hash).await
    }

    /// Poll the receipt endpoint until inclusion, revert, or deadline.
    async fn wait_for_receipt(
        &self,
        operation: &'static str,
        tx_hash: TxHash,
    ) -> Result<Receipt, ChainError> {
        let endpoint = format!("GET /v1/transactions/{tx_hash}/receipt");
        let url = format!("{}v1/transactions/{tx_hash}/receipt", self.gateway());
        let deadline = Instant::now() + self.submit_timeout();

        loop {
            let resp = self
                .http()
                .get(&url)
                .send()
                .await
                .map_err(|e| ChainError::Transport {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;

            if resp.status() != reqwest::StatusCode::NOT_FOUND {
                if !resp.status().is_success() {
                    let status = resp.status().as_u16();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(ChainError::Api {
                        endpoint,
                        status,
                        body,
                    });
                }

                let envelope: ReceiptEnvelope =
                    resp.json().await.map_err(|e| ChainError::Deserialization {
                        endpoint: endpoint.clone(),
                        source: e,
                    })?;

                return match envelope.status {
                    ReceiptStatus::Included => {
                        tracing::debug!(tx_hash = %envelope.receipt.tx_hash, operation, "write included");
                        Ok(envelope.receipt)
                    }
                    ReceiptStatus::Reverted => Err(ChainError::Reverted {
                        operation: operation.to_string(),
                        reason: envelope
                            .revert_reason
                            .unwrap_or_else(|| "execution reverted".to_string()),
                    }),
                };
            }

            if Instant::now() + self.receipt_poll_interval() >= deadline {
                return Err(ChainError::Timeout {
                    tx_hash,
                    waited_secs: self.submit_timeout().as_secs(),
                });
            }
            tokio::time::sleep(self.receipt_poll_interval()).await;
        }
    }
}
