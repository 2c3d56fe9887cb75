//! Transfer entry points and the single/multi-part strategy choice.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use vodvault_client::GatewayClient;
use vodvault_core::constants::SINGLE_PUT_LIMIT_BYTES;
use vodvault_core::models::{CreateVideoRecord, TransferTarget, VideoRecord};
use vodvault_core::{ProgressFn, ProgressReporter, VaultError, VaultResult};
use vodvault_sync::ChangeDetector;

use crate::{download, multi, single};

/// Whether `size` fits a single signed PUT. Files exactly at the limit
/// take the multi-part path.
fn fits_single_put(size: u64) -> bool {
    size < SINGLE_PUT_LIMIT_BYTES
}

/// Facade over the uploaders, the downloader, and the mutation wrappers.
/// Every successful mutation advances the bucket's logical clock through
/// the shared [`ChangeDetector`].
pub struct TransferEngine {
    client: GatewayClient,
    detector: Arc<ChangeDetector>,
}

impl TransferEngine {
    pub fn new(client: GatewayClient, detector: Arc<ChangeDetector>) -> Self {
        Self { client, detector }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Upload a local file under its file name as the bucket key,
    /// reporting progress 0–100 through `progress`.
    pub async fn upload(&self, path: &Path, progress: ProgressFn) -> VaultResult<()> {
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                VaultError::InvalidInput(format!("not an uploadable path: {}", path.display()))
            })?;
        let size = tokio::fs::metadata(path).await?.len();
        let target = TransferTarget::new(key, size);
        let reporter = ProgressReporter::new(progress);

        let start = Instant::now();
        if fits_single_put(size) {
            single::upload_single(&self.client, path, &target, &reporter).await?;
        } else {
            multi::upload_multipart(&self.client, path, &target, &reporter).await?;
        }
        self.detector.advance_clock().await?;

        tracing::info!(
            bucket = %self.client.bucket(),
            key = %target.key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "upload complete"
        );
        Ok(())
    }

    /// Stream an object into `dest_dir/key`, creating parent directories
    /// as needed. Returns the written path.
    pub async fn download(
        &self,
        key: &str,
        source_url: &str,
        dest_dir: &Path,
        progress: ProgressFn,
    ) -> VaultResult<PathBuf> {
        let reporter = ProgressReporter::new(progress);
        let start = Instant::now();
        let dest = download::download_to(&self.client, key, source_url, dest_dir, &reporter).await?;

        tracing::info!(
            bucket = %self.client.bucket(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "download complete"
        );
        Ok(dest)
    }

    /// Create the metadata record for an uploaded object and advance the
    /// clock.
    pub async fn register_recording(
        &self,
        record: &CreateVideoRecord,
    ) -> VaultResult<VideoRecord> {
        let record = self.client.create_record(record).await?;
        self.detector.advance_clock().await?;
        Ok(record)
    }

    /// Delete a recording's record (and backing object) and advance the
    /// clock.
    pub async fn delete_recording(&self, id: Uuid) -> VaultResult<()> {
        self.client.delete_record(id).await?;
        self.detector.advance_clock().await
    }

    /// Toggle housekeeping protection on a recording and advance the
    /// clock.
    pub async fn protect_recording(&self, id: Uuid, protected: bool) -> VaultResult<()> {
        self.client.protect_record(id, protected).await?;
        self.detector.advance_clock().await
    }

    /// Re-tag a recording and advance the clock.
    pub async fn tag_recording(&self, id: Uuid, tag: &str) -> VaultResult<()> {
        self.client.tag_record(id, tag).await?;
        self.detector.advance_clock().await
    }
}
