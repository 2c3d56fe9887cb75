//! Video record CRUD wrappers.
//!
//! Plain pass-through calls with no state machine of their own. Callers
//! that mutate records are expected to advance the bucket's logical clock
//! afterwards; the `TransferEngine` does this for them.

use serde_json::json;
use uuid::Uuid;

use vodvault_core::models::{CreateVideoRecord, VideoRecord};
use vodvault_core::VaultResult;

use crate::GatewayClient;

impl GatewayClient {
    /// List all records in the bucket.
    pub async fn list_records(&self) -> VaultResult<Vec<VideoRecord>> {
        self.get(&self.bucket_path("/records")).await
    }

    /// Create a record for an already-uploaded object.
    pub async fn create_record(&self, record: &CreateVideoRecord) -> VaultResult<VideoRecord> {
        self.post_json(&self.bucket_path("/records"), record).await
    }

    /// Delete a record and its backing object.
    pub async fn delete_record(&self, id: Uuid) -> VaultResult<()> {
        self.delete(&self.bucket_path(&format!("/records/{}", id)))
            .await
    }

    /// Mark or unmark a record as exempt from gateway housekeeping.
    pub async fn protect_record(&self, id: Uuid, protected: bool) -> VaultResult<()> {
        self.put_json(
            &self.bucket_path(&format!("/records/{}/protect", id)),
            &json!({ "protected": protected }),
        )
        .await
    }

    /// Replace a record's tag.
    pub async fn tag_record(&self, id: Uuid, tag: &str) -> VaultResult<()> {
        self.put_json(
            &self.bucket_path(&format!("/records/{}/tag", id)),
            &json!({ "tag": tag }),
        )
        .await
    }
}
