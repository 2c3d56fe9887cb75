//! Single-part upload: one file, one signed URL, one PUT.

use std::path::Path;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use vodvault_client::GatewayClient;
use vodvault_core::models::TransferTarget;
use vodvault_core::progress::percent;
use vodvault_core::{content_type_for_key, ProgressReporter, VaultError, VaultResult};

use crate::stream::file_body;

pub(crate) async fn upload_single(
    client: &GatewayClient,
    path: &Path,
    target: &TransferTarget,
    progress: &ProgressReporter,
) -> VaultResult<()> {
    // Resolve the content type before any network call so unsupported
    // suffixes fail without touching the gateway.
    let content_type = content_type_for_key(&target.key)?;
    let url = client.sign_put(&target.key, target.size).await?;

    let file = tokio::fs::File::open(path).await?;
    let total = target.size;
    let reporter = progress.clone();
    let body = file_body(file, total, move |sent| {
        reporter.report(percent(sent, total));
    });

    let response = client
        .http()
        .put(&url)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, total)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(VaultError::Put {
            status: status.as_u16(),
            body,
        });
    }

    progress.finish();
    Ok(())
}
