//! # acadledger-pin-client -- Typed Rust client for the pinning service
//!
//! Provides ergonomic, typed access to the content-addressed pinning
//! service that stores credential documents and metadata off-chain:
//!
//! - **Pinning** via `POST /pinning/pinFileToIPFS` and
//!   `POST /pinning/pinJSONToIPFS`
//! - **Retrieval** via the HTTP gateway (`GET {gateway}/ipfs/{cid}`)
//! - **Pin management** via `DELETE /pinning/unpin/{cid}` and the
//!   `GET /data/testAuthentication` reachability probe
//!
//! ## Architecture
//!
//! This crate is the only path for the stack to reach pinned content.
//! It performs no retries: a transport failure is surfaced as-is and the
//! caller decides whether to retry. Successful pins are never tracked or
//! garbage-collected here; a pin orphaned by a later step failing
//! upstream stays pinned until an operator unpins it.

pub mod config;
pub mod error;
pub mod fetch;
pub mod pin;

pub use config::PinServiceConfig;
pub use error::PinServiceError;
pub use pin::{PinReceipt, PinTag};

use std::time::Duration;

/// Client for the pinning service API and its HTTP gateway.
#[derive(Debug, Clone)]
pub struct PinClient {
    http: reqwest::Client,
    api_url: url::Url,
    gateway_url: url::Url,
    max_upload_bytes: u64,
}

impl PinClient {
    /// Create a new pinning client from configuration.
    pub fn new(config: PinServiceConfig) -> Result<Self, PinServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_token.as_str()
                    ))
                    .map_err(|_| {
                        PinServiceError::Config(config::ConfigError::MissingToken)
                    })?,
                );
                headers
            })
            .build()
            .map_err(|e| PinServiceError::Transport {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            api_url: config.api_url,
            gateway_url: config.gateway_url,
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// The configured upload ceiling in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn api_url(&self) -> &url::Url {
        &self.api_url
    }

    pub(crate) fn gateway(&self) -> &url::Url {
        &self.gateway_url
    }
}
