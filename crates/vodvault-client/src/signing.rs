//! Signed-URL acquisition: request → authorize → use.
//!
//! The gateway enforces bucket capacity when it signs, so a quota
//! rejection surfaces here as a `Gateway` error before any object-store
//! traffic happens.

use serde_json::json;

use vodvault_core::models::signing::{CompleteMultipart, MultipartSession, SignedPutUrl};
use vodvault_core::VaultResult;

use crate::GatewayClient;

impl GatewayClient {
    /// Request one signed URL for a PUT of exactly `length` bytes under
    /// `key`.
    pub async fn sign_put(&self, key: &str, length: u64) -> VaultResult<String> {
        let signed: SignedPutUrl = self
            .post_json(
                &self.bucket_path("/uploads/sign-put"),
                &json!({ "key": key, "length": length }),
            )
            .await?;

        tracing::debug!(bucket = %self.bucket(), key = %key, length, "signed single-part PUT");
        Ok(signed.url)
    }

    /// Request a full multi-part session for an object of `length` bytes.
    /// The number of URLs returned is the gateway's choice; it determines
    /// how many parts the uploader must produce.
    pub async fn create_multipart_session(
        &self,
        key: &str,
        length: u64,
    ) -> VaultResult<MultipartSession> {
        let session: MultipartSession = self
            .post_json(
                &self.bucket_path("/uploads/multipart"),
                &json!({ "key": key, "length": length }),
            )
            .await?;

        tracing::debug!(
            bucket = %self.bucket(),
            key = %key,
            length,
            parts = session.part_urls.len(),
            "created multi-part session"
        );
        Ok(session)
    }

    /// Finalize a multi-part session with completion tokens in ascending
    /// part order. The gateway rejects missing or out-of-order tokens.
    pub async fn complete_multipart_session(
        &self,
        key: &str,
        tokens: &[String],
    ) -> VaultResult<()> {
        self.post_json_unit(
            &self.bucket_path("/uploads/multipart/complete"),
            &CompleteMultipart { key, tokens },
        )
        .await?;

        tracing::debug!(bucket = %self.bucket(), key = %key, parts = tokens.len(), "finalized multi-part session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodvault_core::{GatewayConfig, VaultError};

    fn test_client(server: &mockito::Server) -> GatewayClient {
        GatewayClient::new(&GatewayConfig::new(server.url(), "guild-1", "secret")).unwrap()
    }

    #[tokio::test]
    async fn sign_put_returns_the_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v0/buckets/guild-1/uploads/sign-put")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"key": "a.mp4", "length": 100}),
            ))
            .with_status(200)
            .with_body(r#"{"url":"https://store.example/put/a.mp4?sig=x"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let url = client.sign_put("a.mp4", 100).await.unwrap();
        assert_eq!(url, "https://store.example/put/a.mp4?sig=x");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn multipart_session_preserves_url_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v0/buckets/guild-1/uploads/multipart")
            .with_status(200)
            .with_body(r#"{"part_urls":["u0","u1","u2"]}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let session = client.create_multipart_session("a.mp4", 3).await.unwrap();
        assert_eq!(session.part_urls, vec!["u0", "u1", "u2"]);
    }

    #[tokio::test]
    async fn complete_posts_ordered_tokens() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v0/buckets/guild-1/uploads/multipart/complete")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"key": "a.mp4", "tokens": ["t0", "t1"]}),
            ))
            .with_status(200)
            .create_async()
            .await;

        let client = test_client(&server);
        let tokens = vec!["t0".to_string(), "t1".to_string()];
        client
            .complete_multipart_session("a.mp4", &tokens)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn quota_rejection_is_a_gateway_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v0/buckets/guild-1/uploads/sign-put")
            .with_status(507)
            .with_body("max storage reached")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.sign_put("a.mp4", 100).await.unwrap_err();
        assert!(matches!(err, VaultError::Gateway { status: 507, .. }));
    }
}
