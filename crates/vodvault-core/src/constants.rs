//! Transfer policy constants.

/// One gibibyte.
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Upper bound for a single-PUT upload: 4.9 GiB. The object store rejects
/// any single PUT above 5 GiB; the margin absorbs protocol overhead.
/// Files at or above this size take the multi-part path.
pub const SINGLE_PUT_LIMIT_BYTES: u64 = 49 * GIB / 10;

/// Fixed byte length of every multi-part range except the last. The
/// gateway derives the part-URL count from the same value; see
/// `VaultError::PartCountMismatch` for the guard against drift.
pub const MULTIPART_PART_BYTES: u64 = GIB;

/// Read buffer size for streamed upload bodies.
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;
