//! Upload content-type policy.
//!
//! A deliberate allow-list, not a best-effort guess: the bucket stores
//! video recordings and their thumbnail images, nothing else. Unrecognized
//! suffixes are rejected before any network activity.

use crate::error::{VaultError, VaultResult};

/// Resolve the content type for a bucket key from its suffix.
///
/// `.mp4` maps to `video/mp4` and `.png` to `image/png`; any other suffix
/// fails with [`VaultError::UnsupportedType`]. The match is exact — no
/// case folding, no sniffing.
pub fn content_type_for_key(key: &str) -> VaultResult<&'static str> {
    if key.ends_with(".mp4") {
        Ok("video/mp4")
    } else if key.ends_with(".png") {
        Ok("image/png")
    } else {
        Err(VaultError::UnsupportedType(key.to_string()))
    }
}
