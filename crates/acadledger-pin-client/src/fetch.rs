//! Content retrieval through the HTTP gateway.

use serde::de::DeserializeOwned;

use acadledger_core::ContentId;

use crate::error::PinServiceError;
use crate::PinClient;

impl PinClient {
    /// The gateway URL for a pinned content id, suitable for handing to
    /// a browser or a document viewer. No request is made.
    pub fn gateway_url(&self, content_id: &ContentId) -> String {
        format!("{}ipfs/{content_id}", self.gateway())
    }

    /// Fetch a previously pinned JSON document.
    ///
    /// Calls `GET {gateway}/ipfs/{cid}` and deserializes the body.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        content_id: &ContentId,
    ) -> Result<T, PinServiceError> {
        let endpoint = format!("GET /ipfs/{content_id}");
        let url = self.gateway_url(content_id);

        let resp = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| PinServiceError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PinServiceError::NotFound {
                content_id: content_id.to_string(),
                endpoint,
            });
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PinServiceError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| PinServiceError::Deserialization {
            endpoint,
            source: e,
        })
    }
}
