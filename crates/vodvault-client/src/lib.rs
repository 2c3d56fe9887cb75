//! HTTP client for the vodvault signing/metadata gateway.
//!
//! Provides a minimal client with configurable auth (static `X-API-Key`
//! header or Bearer token), generic request helpers with the engine's
//! status mapping, and domain methods (signing, clock, usage, records).
//! Every method is one request/response round trip; no retries anywhere —
//! a failure is terminal for the enclosing operation.

pub mod bucket;
pub mod records;
pub mod signing;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use vodvault_core::{GatewayConfig, VaultError, VaultResult};

/// API version prefix for all gateway routes.
pub fn api_prefix() -> &'static str {
    "/api/v0"
}

/// Authentication strategy for the gateway.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// Client for one gateway and one bucket.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    bucket: String,
    auth: Auth,
}

impl GatewayClient {
    /// Build a client from gateway settings, authenticating with the
    /// configured static credential header.
    pub fn new(config: &GatewayConfig) -> VaultResult<Self> {
        Self::with_auth(config, Auth::XApiKey(config.api_key.clone()))
    }

    pub fn with_auth(config: &GatewayConfig, auth: Auth) -> VaultResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            auth,
        })
    }

    /// Build a client from `VODVAULT_*` environment variables.
    pub fn from_env() -> VaultResult<Self> {
        Self::new(&GatewayConfig::from_env()?)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Route under this client's bucket scope.
    pub(crate) fn bucket_path(&self, suffix: &str) -> String {
        format!(
            "{}/buckets/{}{}",
            api_prefix(),
            urlencoding::encode(&self.bucket),
            suffix
        )
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// Map a non-success gateway status onto the engine taxonomy: 401/403
    /// become `Authorization`, everything else `Gateway` with the response
    /// body captured.
    fn failure_error(status: StatusCode, body: String) -> VaultError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            VaultError::Authorization(format!(
                "gateway rejected credentials ({}): {}",
                status.as_u16(),
                body
            ))
        } else {
            VaultError::Gateway {
                status: status.as_u16(),
                body,
            }
        }
    }

    /// Send an authenticated request, surfacing non-success statuses as
    /// engine errors.
    async fn send_checked(&self, request: RequestBuilder) -> VaultResult<Response> {
        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(Self::failure_error(status, body))
    }

    /// GET request, deserializing the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> VaultResult<T> {
        let response = self.send_checked(self.client.get(self.build_url(path))).await?;
        Ok(response.json().await?)
    }

    /// GET request where the resource may not exist yet: 404 is `None`,
    /// not an error.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> VaultResult<Option<T>> {
        let response = self
            .apply_auth(self.client.get(self.build_url(path)))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::failure_error(status, body));
        }

        Ok(Some(response.json().await?))
    }

    /// POST a JSON body and deserialize the response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> VaultResult<T> {
        let response = self
            .send_checked(self.client.post(self.build_url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body, discarding the response body.
    pub(crate) async fn post_json_unit<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> VaultResult<()> {
        self.send_checked(self.client.post(self.build_url(path)).json(body))
            .await?;
        Ok(())
    }

    /// PUT a JSON body, discarding the response body.
    pub(crate) async fn put_json<B: serde::Serialize>(&self, path: &str, body: &B) -> VaultResult<()> {
        self.send_checked(self.client.put(self.build_url(path)).json(body))
            .await?;
        Ok(())
    }

    /// DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> VaultResult<()> {
        self.send_checked(self.client.delete(self.build_url(path)))
            .await?;
        Ok(())
    }

    /// Raw client for requests outside the gateway, i.e. signed object
    /// store URLs. No credential header is applied — a signed URL is its
    /// own authorization.
    pub fn http(&self) -> &Client {
        &self.client
    }
}
