//! Pinning service error taxonomy.
//!
//! Every variant names the endpoint that failed so that a failure deep
//! inside a multi-step flow can be attributed to the exact adapter call.
//! Nothing here is retried internally; retryability is the caller's call.

use thiserror::Error;

pub use crate::config::ConfigError;

/// Errors from the pinning service client.
#[derive(Debug, Error)]
pub enum PinServiceError {
    /// The service rejected our credentials (HTTP 401/403).
    #[error("pin service rejected authentication at {endpoint}: {body}")]
    Unavailable {
        /// Endpoint that rejected the request.
        endpoint: String,
        /// Response body, for operator diagnosis.
        body: String,
    },

    /// Payload exceeds the configured ceiling. Raised locally before any
    /// bytes are sent, or mapped from an HTTP 413.
    #[error("payload of {size} bytes exceeds the {limit}-byte upload ceiling")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        size: u64,
        /// The configured ceiling.
        limit: u64,
    },

    /// The requested content does not exist (or is not pinned here).
    #[error("content {content_id} not found at {endpoint}")]
    NotFound {
        /// The missing content identifier.
        content_id: String,
        /// Endpoint that reported it missing.
        endpoint: String,
    },

    /// Network-level failure reaching the service.
    #[error("transport failure at {endpoint}")]
    Transport {
        /// Endpoint that could not be reached.
        endpoint: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with an unexpected non-success status.
    #[error("pin service error at {endpoint} (HTTP {status}): {body}")]
    Api {
        /// Endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body for {endpoint}")]
    Encode {
        /// Endpoint the body was intended for.
        endpoint: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
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
