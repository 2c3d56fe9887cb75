//! Streaming request bodies with byte-level progress.

use std::sync::atomic::{AtomicU64, Ordering};

use futures::TryStreamExt;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

use vodvault_core::constants::UPLOAD_CHUNK_BYTES;

/// Wrap (a bounded read of) `file` as a PUT body, invoking `on_sent` with
/// the cumulative byte count as chunks are pulled off the stream. The
/// file is never buffered whole — recordings run to gigabytes.
pub(crate) fn file_body<F>(file: File, limit: u64, on_sent: F) -> reqwest::Body
where
    F: Fn(u64) + Send + Sync + 'static,
{
    let sent = AtomicU64::new(0);
    let stream =
        ReaderStream::with_capacity(file.take(limit), UPLOAD_CHUNK_BYTES).inspect_ok(move |chunk| {
            let total = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
            on_sent(total);
        });
    reqwest::Body::wrap_stream(stream)
}
