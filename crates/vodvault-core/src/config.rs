//! Configuration module
//!
//! Environment-driven settings for reaching the signing gateway. Every
//! vodvault process talks to exactly one gateway and one bucket.

use std::env;

use crate::error::{VaultError, VaultResult};

const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the signing/metadata gateway.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Gateway base URL, without a trailing slash.
    pub base_url: String,
    /// Bucket scoping all keys, quota, and the logical clock.
    pub bucket: String,
    /// Static credential sent with every gateway request.
    pub api_key: String,
    /// Per-request timeout applied to the underlying HTTP client.
    pub http_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            api_key: api_key.into(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Load from environment: `VODVAULT_GATEWAY_URL`, `VODVAULT_BUCKET`,
    /// `VODVAULT_API_KEY`, `VODVAULT_HTTP_TIMEOUT_SECS`. A `.env` file is
    /// honored when present.
    pub fn from_env() -> VaultResult<Self> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("VODVAULT_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        let bucket = env::var("VODVAULT_BUCKET")
            .map_err(|_| VaultError::InvalidInput("VODVAULT_BUCKET must be set".to_string()))?;
        let api_key = env::var("VODVAULT_API_KEY")
            .map_err(|_| VaultError::InvalidInput("VODVAULT_API_KEY must be set".to_string()))?;
        let http_timeout_secs = env::var("VODVAULT_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let mut config = Self::new(base_url, bucket, api_key);
        config.http_timeout_secs = http_timeout_secs;
        Ok(config)
    }
}
