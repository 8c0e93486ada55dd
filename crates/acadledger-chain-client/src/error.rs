//! Ledger gateway error taxonomy.
//!
//! The variants separate the caller-actionable classes: a transport
//! failure is retryable, a revert is terminal for those arguments, and a
//! timeout after broadcast means the write's fate is unknown until a
//! follow-up read.

use thiserror::Error;

use crate::operation::TxHash;

pub use crate::config::ConfigError;

/// Errors from the ledger gateway client.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The gateway is connected to a different chain and could not (or
    /// declined to) switch.
    #[error("connected to chain {actual}, expected {expected}, and the switch was declined")]
    NetworkMismatch {
        /// The chain id this client was configured for.
        expected: u64,
        /// The chain id the gateway reported.
        actual: u64,
    },

    /// The ledger rejected the write. Terminal: resubmitting the same
    /// arguments will fail the same way.
    #[error("operation {operation} reverted: {reason}")]
    Reverted {
        /// The write operation that was rejected.
        operation: String,
        /// Revert reason reported by the ledger.
        reason: String,
    },

    /// A read against ledger state reverted (e.g. querying a record that
    /// does not exist).
    #[error("read {endpoint} reverted: {reason}")]
    CallReverted {
        /// The read endpoint.
        endpoint: String,
        /// Revert reason reported by the gateway.
        reason: String,
    },

    /// Network-level failure reaching the gateway.
    #[error("transport failure at {endpoint}")]
    Transport {
        /// Endpoint that could not be reached.
        endpoint: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The write was broadcast but inclusion was not observed within the
    /// bounded wait. The write may still land; the caller must reconcile
    /// with a follow-up read before retrying.
    #[error("transaction {tx_hash} not included within {waited_secs}s")]
    Timeout {
        /// Hash of the broadcast transaction.
        tx_hash: TxHash,
        /// How long the client waited.
        waited_secs: u64,
    },

    /// The gateway answered with an unexpected non-success status.
    #[error("gateway error at {endpoint} (HTTP {status}): {body}")]
    Api {
        /// Endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response from {endpoint}")]
    Deserialization {
        /// Endpoint whose response failed to parse.
        endpoint: String,
        /// Underlying reqwest/serde error.
        #[source]
        source: reqwest::Error,
    },

    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
