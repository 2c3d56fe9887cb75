//! Download with progress: size lookup, streamed GET, write-through to a
//! local file.

use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use tokio::io::AsyncWriteExt;

use vodvault_client::GatewayClient;
use vodvault_core::progress::percent;
use vodvault_core::{ProgressReporter, VaultError, VaultResult};

pub(crate) async fn download_to(
    client: &GatewayClient,
    key: &str,
    source_url: &str,
    dest_dir: &Path,
    progress: &ProgressReporter,
) -> VaultResult<PathBuf> {
    // Size comes from the gateway, not the response headers, so progress
    // can be normalized even when the store omits a length.
    let size = client.object_size(key).await?;

    let response = client.http().get(source_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(VaultError::Get {
            status: status.as_u16(),
            body,
        });
    }

    let dest = dest_dir.join(key);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(&dest).await?;

    let mut received: u64 = 0;
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.try_next().await? {
        file.write_all(&chunk).await?;
        received += chunk.len() as u64;
        progress.report(percent(received, size));
    }
    file.flush().await?;

    progress.finish();
    Ok(dest)
}
