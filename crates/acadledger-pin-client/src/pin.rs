//! Pinning operations.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/pinning/pinFileToIPFS` | Pin a binary document |
//! | POST   | `/pinning/pinJSONToIPFS` | Pin a JSON document |
//! | DELETE | `/pinning/unpin/{cid}` | Remove a pin |
//! | GET    | `/data/testAuthentication` | Credential probe |
//!
//! Uploads are checked against the configured byte ceiling BEFORE any
//! request is sent, so an oversized document never leaves the process.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use acadledger_core::ContentId;

use crate::error::PinServiceError;
use crate::PinClient;

/// Descriptive tag attached to a pin for later lookup in the provider's
/// pin listing. The keyvalue map is ordered so serialization is stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PinTag {
    /// Human-readable pin name.
    pub name: String,
    /// Free-form searchable key/value annotations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub keyvalues: BTreeMap<String, String>,
}

impl PinTag {
    /// Build a tag with a name and no annotations.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyvalues: BTreeMap::new(),
        }
    }

    /// Add a keyvalue annotation.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.insert(key.into(), value.into());
        self
    }
}

/// Successful pin response.
#[derive(Debug, Clone, Deserialize)]
pub struct PinReceipt {
    /// The content identifier the service derived for the payload.
    #[serde(rename = "IpfsHash")]
    pub content_id: ContentId,
    /// Pinned size in bytes.
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
    /// Provider-side pin timestamp.
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
    /// Set when the payload was already pinned under the same id.
    #[serde(rename = "isDuplicate", default)]
    pub is_duplicate: bool,
}

impl PinClient {
    /// Pin a binary document.
    ///
    /// Calls `POST {api}/pinning/pinFileToIPFS` with a multipart form.
    pub async fn pin_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        tag: PinTag,
    ) -> Result<PinReceipt, PinServiceError> {
        let endpoint = "POST /pinning/pinFileToIPFS";
        let size = bytes.len() as u64;
        if size > self.max_upload_bytes() {
            return Err(PinServiceError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes(),
            });
        }

        let url = format!("{}pinning/pinFileToIPFS", self.api_url());
        let tag_json = serde_json::to_string(&tag).map_err(|e| PinServiceError::Encode {
            endpoint: endpoint.into(),
            source: e,
        })?;
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("pinataMetadata", tag_json)
            .text("pinataOptions", r#"{"cidVersion":1}"#);

        let resp = self
            .http()
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinServiceError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::PAYLOAD_TOO_LARGE {
            return Err(PinServiceError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_for(endpoint, resp).await);
        }

        tracing::debug!(%size, file_name, "document pinned");
        resp.json().await.map_err(|e| PinServiceError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Pin a JSON document.
    ///
    /// The document is serialized once, size-checked against the upload
    /// ceiling, and submitted via `POST {api}/pinning/pinJSONToIPFS`.
    pub async fn pin_json<T: Serialize>(
        &self,
        doc: &T,
        tag: PinTag,
    ) -> Result<PinReceipt, PinServiceError> {
        let endpoint = "POST /pinning/pinJSONToIPFS";
        let content = serde_json::to_value(doc).map_err(|e| PinServiceError::Encode {
            endpoint: endpoint.into(),
            source: e,
        })?;
        let size = content.to_string().len() as u64;
        if size > self.max_upload_bytes() {
            return Err(PinServiceError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes(),
            });
        }

        let url = format!("{}pinning/pinJSONToIPFS", self.api_url());
        let body = serde_json::json!({
            "pinataContent": content,
            "pinataMetadata": tag,
            "pinataOptions": { "cidVersion": 1 },
        });

        let resp = self
            .http()
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PinServiceError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::PAYLOAD_TOO_LARGE {
            return Err(PinServiceError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_for(endpoint, resp).await);
        }

        resp.json().await.map_err(|e| PinServiceError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Remove a pin.
    ///
    /// Calls `DELETE {api}/pinning/unpin/{cid}`.
    pub async fn unpin(&self, content_id: &ContentId) -> Result<(), PinServiceError> {
        let endpoint = format!("DELETE /pinning/unpin/{content_id}");
        let url = format!("{}pinning/unpin/{content_id}", self.api_url());

        let resp = self
            .http()
            .delete(&url)
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
            return Err(error_for(&endpoint, resp).await);
        }
        Ok(())
    }

    /// Probe the service with the configured credentials.
    ///
    /// Calls `GET {api}/data/testAuthentication`. A clean return means
    /// the token is accepted and the service is reachable.
    pub async fn check_auth(&self) -> Result<(), PinServiceError> {
        let endpoint = "GET /data/testAuthentication";
        let url = format!("{}data/testAuthentication", self.api_url());

        let resp = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| PinServiceError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(error_for(endpoint, resp).await);
        }
        Ok(())
    }
}

/// Map a non-success response to the right failure class: 401/403 means
/// the service rejected authentication, everything else is a generic
/// API failure carrying status and body.
async fn error_for(endpoint: &str, resp: reqwest::Response) -> PinServiceError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    match status {
        401 | 403 => PinServiceError::Unavailable {
            endpoint: endpoint.to_string(),
            body,
        },
        _ => PinServiceError::Api {
            endpoint: endpoint.to_string(),
            status,
            body,
        },
    }
}
