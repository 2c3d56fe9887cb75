//! Bucket-level lookups: logical clock, object sizes, storage accounting.

use serde_json::json;

use vodvault_core::models::signing::{ClockValue, ObjectSize};
use vodvault_core::models::BucketUsage;
use vodvault_core::VaultResult;

use crate::GatewayClient;

impl GatewayClient {
    /// Read the bucket's logical clock. `None` means the clock has never
    /// been written — an expected state for a fresh bucket, not a failure.
    pub async fn fetch_clock(&self) -> VaultResult<Option<String>> {
        let clock: Option<ClockValue> = self.get_optional(&self.bucket_path("/clock")).await?;
        Ok(clock.map(|c| c.value))
    }

    /// Write the bucket's logical clock.
    pub async fn push_clock(&self, value: &str) -> VaultResult<()> {
        self.put_json(&self.bucket_path("/clock"), &json!({ "value": value }))
            .await
    }

    /// Byte length of a stored object.
    pub async fn object_size(&self, key: &str) -> VaultResult<u64> {
        let path = self.bucket_path(&format!("/objects/{}/size", urlencoding::encode(key)));
        let size: ObjectSize = self.get(&path).await?;
        Ok(size.size)
    }

    /// Current storage accounting for the bucket.
    pub async fn usage(&self) -> VaultResult<BucketUsage> {
        self.get(&self.bucket_path("/usage")).await
    }

    /// Update the bucket's storage ceiling.
    pub async fn set_max_storage(&self, max_bytes: u64) -> VaultResult<()> {
        self.put_json(
            &self.bucket_path("/usage/max-storage"),
            &json!({ "max_bytes": max_bytes }),
        )
        .await
    }
}
