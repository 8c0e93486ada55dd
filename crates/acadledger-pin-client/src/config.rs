//! Pinning service configuration.
//!
//! Defaults point at the hosted pinning provider. Override via
//! environment variables or explicit construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Default ceiling on a single upload, matching the 10 MB cap the
/// issuance form enforces client-side.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for connecting to the pinning service.
///
/// Custom `Debug` implementation redacts the `api_token` field to
/// prevent credential leakage in log output.
#[derive(Clone)]
pub struct PinServiceConfig {
    /// Base URL of the pinning API.
    /// Default: <https://api.pinata.cloud>
    pub api_url: Url,
    /// Base URL of the HTTP gateway used for content retrieval.
    /// Default: <https://gateway.pinata.cloud>
    pub gateway_url: Url,
    /// Bearer token (JWT) for API authentication.
    pub api_token: Zeroizing<String>,
    /// Ceiling on a single upload, in bytes. Checked locally before any
    /// request is sent.
    pub max_upload_bytes: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PinServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinServiceConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("api_token", &"[REDACTED]")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PinServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PIN_API_URL` (default: `https://api.pinata.cloud`)
    /// - `PIN_GATEWAY_URL` (default: `https://gateway.pinata.cloud`)
    /// - `PIN_API_TOKEN` (required)
    /// - `PIN_MAX_UPLOAD_BYTES` (default: 10485760)
    /// - `PIN_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = std::env::var("PIN_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        Ok(Self {
            api_url: env_url("PIN_API_URL", "https://api.pinata.cloud")?,
            gateway_url: env_url("PIN_GATEWAY_URL", "https://gateway.pinata.cloud")?,
            api_token: Zeroizing::new(api_token),
            max_upload_bytes: std::env::var("PIN_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            timeout_secs: std::env::var("PIN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local_mock(port: u16, token: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            api_url: base.clone(),
            gateway_url: base,
            api_token: Zeroizing::new(token.to_string()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PIN_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
