//! Transfer engine: moves recordings between the local filesystem and the
//! object store behind the signing gateway.
//!
//! [`TransferEngine::upload`] selects the execution path by size — one
//! signed PUT for ordinary files, a sequential multi-part session for
//! files too large for a single request — and advances the bucket's
//! logical clock after every successful mutation. Downloads stream to
//! disk with the same progress reporting. Nothing here retries: a failure
//! anywhere aborts the enclosing transfer.

mod download;
mod engine;
mod multi;
pub mod parts;
mod single;
mod stream;

pub use engine::TransferEngine;
pub use parts::{part_ranges, PartRange};
