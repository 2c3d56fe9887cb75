//! Wire types for the signed-URL acquisition protocol.

use serde::{Deserialize, Serialize};

/// Response to a single-part signing request: one URL, valid for one PUT
/// of the declared length. Expiry is enforced server-side and not tracked
/// here.
#[derive(Debug, Deserialize)]
pub struct SignedPutUrl {
    pub url: String,
}

/// A multi-part upload session. The gateway decides the part count; the
/// session is identified implicitly by its ordered URL sequence.
#[derive(Debug, Deserialize)]
pub struct MultipartSession {
    /// One signed URL per part, in ascending part order.
    pub part_urls: Vec<String>,
}

/// Finalization payload: completion tokens in ascending part order.
#[derive(Debug, Serialize)]
pub struct CompleteMultipart<'a> {
    pub key: &'a str,
    pub tokens: &'a [String],
}

/// The bucket's logical clock value as stored by the gateway.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClockValue {
    pub value: String,
}

/// Byte length of a stored object.
#[derive(Debug, Deserialize)]
pub struct ObjectSize {
    pub size: u64,
}
