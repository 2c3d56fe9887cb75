//! Multi-part upload: fixed-size byte ranges, each PUT to its own signed
//! URL in ascending order, finalized with the ordered completion tokens.
//!
//! There is no partial-session cleanup on failure — the abandoned session
//! is left for the remote side to garbage-collect — and no retry: the
//! first failed part aborts the transfer.

use std::io::SeekFrom;
use std::path::Path;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG};
use tokio::io::AsyncSeekExt;

use vodvault_client::GatewayClient;
use vodvault_core::constants::MULTIPART_PART_BYTES;
use vodvault_core::models::TransferTarget;
use vodvault_core::progress::percent;
use vodvault_core::{content_type_for_key, ProgressReporter, VaultError, VaultResult};

use crate::parts::part_ranges;
use crate::stream::file_body;

pub(crate) async fn upload_multipart(
    client: &GatewayClient,
    path: &Path,
    target: &TransferTarget,
    progress: &ProgressReporter,
) -> VaultResult<()> {
    upload_with_part_size(client, path, target, MULTIPART_PART_BYTES, progress).await
}

async fn upload_with_part_size(
    client: &GatewayClient,
    path: &Path,
    target: &TransferTarget,
    part_size: u64,
    progress: &ProgressReporter,
) -> VaultResult<()> {
    let content_type = content_type_for_key(&target.key)?;
    let session = client
        .create_multipart_session(&target.key, target.size)
        .await?;

    let ranges = part_ranges(target.size, part_size);
    // The gateway derives its URL count from the same part-size policy; a
    // disagreement would otherwise truncate or overrun the upload.
    if ranges.len() != session.part_urls.len() {
        return Err(VaultError::PartCountMismatch {
            computed: ranges.len(),
            issued: session.part_urls.len(),
        });
    }

    let part_count = ranges.len();
    let mut tokens: Vec<String> = Vec::with_capacity(part_count);

    for (range, url) in ranges.iter().zip(&session.part_urls) {
        let mut file = tokio::fs::File::open(path).await?;
        file.seek(SeekFrom::Start(range.offset)).await?;

        let reporter = progress.clone();
        let (index, part_len) = (range.index, range.length);
        let body = file_body(file, part_len, move |sent| {
            reporter.report(part_progress(index, part_count, sent, part_len));
        });

        let response = client
            .http()
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, part_len)
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

        let token = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(VaultError::MissingPartToken(range.index))?;
        tokens.push(token);

        progress.report(percent(range.end(), target.size));
        tracing::debug!(
            key = %target.key,
            part = range.index,
            total_parts = part_count,
            "part uploaded"
        );
    }

    client
        .complete_multipart_session(&target.key, &tokens)
        .await?;
    progress.finish();
    Ok(())
}

/// Progress within part `index` of `total_parts`: the completed parts'
/// share plus this part's fraction of its own share.
fn part_progress(index: usize, total_parts: usize, sent: u64, part_len: u64) -> u8 {
    let share = 100.0 / total_parts as f64;
    let base = index as f64 * share;
    let frac = if part_len == 0 {
        share
    } else {
        (sent as f64 / part_len as f64) * share
    };
    (base + frac).round().min(100.0) as u8
}
