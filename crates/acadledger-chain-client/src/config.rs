//! Ledger gateway configuration.

use url::Url;

/// Chain id of the default target deployment (the Polkadot Hub testnet
/// the credential contract is deployed on).
pub const DEFAULT_CHAIN_ID: u64 = 420_420_422;

/// Configuration for connecting to the ledger signing gateway.
#[derive(Debug, Clone)]
pub struct ChainGatewayConfig {
    /// Base URL of the signing gateway.
    pub gateway_url: Url,
    /// Chain id the gateway must be connected to.
    pub expected_chain_id: u64,
    /// Bounded wait for write inclusion, in seconds.
    pub submit_timeout_secs: u64,
    /// Delay between receipt polls, in milliseconds.
    pub receipt_poll_millis: u64,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
}

impl ChainGatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CHAIN_GATEWAY_URL` (required)
    /// - `CHAIN_EXPECTED_ID` (default: 420420422)
    /// - `CHAIN_SUBMIT_TIMEOUT_SECS` (default: 120)
    /// - `CHAIN_RECEIPT_POLL_MILLIS` (default: 2000)
    /// - `CHAIN_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("CHAIN_GATEWAY_URL").map_err(|_| ConfigError::MissingGatewayUrl)?;
        let gateway_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("CHAIN_GATEWAY_URL".to_string(), e.to_string()))?;

        Ok(Self {
            gateway_url,
            expected_chain_id: env_u64("CHAIN_EXPECTED_ID", DEFAULT_CHAIN_ID),
            submit_timeout_secs: env_u64("CHAIN_SUBMIT_TIMEOUT_SECS", 120),
            receipt_poll_millis: env_u64("CHAIN_RECEIPT_POLL_MILLIS", 2000),
            http_timeout_secs: env_u64("CHAIN_HTTP_TIMEOUT_SECS", 30),
        })
    }

    /// Create a configuration pointing at a local mock gateway (for tests).
    ///
    /// The submit wait is shortened so timeout paths are exercisable in
    /// test time.
    pub fn local_mock(url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway_url: Url::parse(url)
                .map_err(|e| ConfigError::InvalidUrl("local_mock".to_string(), e.to_string()))?,
            expected_chain_id: DEFAULT_CHAIN_ID,
            submit_timeout_secs: 2,
            receipt_poll_millis: 50,
            http_timeout_secs: 5,
        })
    }
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CHAIN_GATEWAY_URL environment variable is required")]
    MissingGatewayUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
