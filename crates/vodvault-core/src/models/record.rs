use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata document the gateway keeps per stored recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    /// Bucket-scoped object key.
    pub key: String,
    pub content_type: String,
    pub file_size: i64,
    pub recorded_at: DateTime<Utc>,
    /// Protected records are exempt from gateway housekeeping.
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Payload for creating a record after its object has been uploaded.
#[derive(Debug, Serialize)]
pub struct CreateVideoRecord {
    pub key: String,
    pub content_type: String,
    pub file_size: i64,
    pub recorded_at: DateTime<Utc>,
}
