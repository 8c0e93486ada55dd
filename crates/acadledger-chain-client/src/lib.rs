//! # acadledger-chain-client -- Typed Rust client for the ledger gateway
//!
//! The credential ledger is reached through a signing gateway bound to
//! the caller's account: the gateway holds the signing capability, this
//! client never touches key material. The client covers three concerns:
//!
//! - **Network verification** -- compare the gateway's chain id against
//!   the expected deployment and request a switch on mismatch.
//! - **Writes** -- submit an operation for signing and broadcast, then
//!   poll for the inclusion receipt within a bounded wait.
//! - **Reads** -- typed queries against current ledger state, one
//!   canonical response shape per query.
//!
//! ## Guarantees
//!
//! `submit` broadcasts at most once per call and never retries; a wait
//! that exceeds the deadline surfaces as [`ChainError::Timeout`] with
//! the transaction hash so the caller can reconcile with a follow-up
//! read. Reads apply no implicit timeout beyond the HTTP client's.

pub mod config;
pub mod error;
pub mod network;
pub mod operation;
pub mod reads;
pub mod writes;

pub use config::ChainGatewayConfig;
pub use error::ChainError;
pub use operation::{
    Capability, CredentialIssuedEvent, EventRecord, Receipt, TxHash, WriteOperation,
    CREDENTIAL_ISSUED_EVENT,
};
pub use reads::{InstitutionState, SubjectState};

use std::time::Duration;

use acadledger_core::AccountAddress;

/// Client for the ledger signing gateway, bound to one connected account.
///
/// The account is session context passed in explicitly at construction;
/// there is no ambient "current account" state anywhere in the stack.
#[derive(Debug, Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    gateway_url: url::Url,
    account: AccountAddress,
    expected_chain_id: u64,
    submit_timeout: Duration,
    receipt_poll_interval: Duration,
}

impl ChainClient {
    /// Create a new gateway client for the given connected account.
    pub fn new(config: ChainGatewayConfig, account: AccountAddress) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| ChainError::Transport {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            gateway_url: config.gateway_url,
            account,
            expected_chain_id: config.expected_chain_id,
            submit_timeout: Duration::from_secs(config.submit_timeout_secs),
            receipt_poll_interval: Duration::from_millis(config.receipt_poll_millis),
        })
    }

    /// The connected account this client signs as.
    pub fn account(&self) -> &AccountAddress {
        &self.account
    }

    /// The chain id this client expects to be connected to.
    pub fn expected_chain_id(&self) -> u64 {
        self.expected_chain_id
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn gateway(&self) -> &url::Url {
        &self.gateway_url
    }

    pub(crate) fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }

    pub(crate) fn receipt_poll_interval(&self) -> Duration {
        self.receipt_poll_interval
    }
}
