//! Error types module
//!
//! All errors are unified under the `VaultError` enum. Authorization
//! rejections are kept separate from other gateway failures so callers can
//! prompt for credential re-entry; everything else carries the offending
//! status and response body for diagnostics.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// 401/403-class rejection from the signing authority. Never retried.
    #[error("Authorization rejected: {0}")]
    Authorization(String),

    /// File suffix is not in the upload allow-list. Raised before any
    /// network call is made.
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    /// Non-auth, non-2xx response from the signing authority. Quota
    /// rejections surface here.
    #[error("Gateway request failed with status {status}: {body}")]
    Gateway { status: u16, body: String },

    /// Non-2xx response from the object store during an upload PUT.
    #[error("Upload failed with status {status}: {body}")]
    Put { status: u16, body: String },

    /// Non-2xx response from the object store during a download GET.
    #[error("Download failed with status {status}: {body}")]
    Get { status: u16, body: String },

    /// The locally computed part layout disagrees with the number of part
    /// URLs the gateway issued. Both sides derive the count from the same
    /// fixed part size; a mismatch means the policy constants have drifted.
    #[error("Part layout mismatch: computed {computed} ranges but gateway issued {issued} URLs")]
    PartCountMismatch { computed: usize, issued: usize },

    /// A part upload response carried no completion token.
    #[error("No completion token in upload response for part {0}")]
    MissingPartToken(usize),

    /// Logical clock bootstrap failed for a reason other than "clock does
    /// not exist yet".
    #[error("Clock initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for vodvault operations
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Whether this error came from a credential rejection. Callers use
    /// this to prompt for re-entry instead of surfacing a raw failure.
    pub fn is_authorization(&self) -> bool {
        matches!(self, VaultError::Authorization(_))
    }
}
