//! Serde models shared between the gateway client and the transfer engine.

pub mod bucket;
pub mod record;
pub mod signing;
pub mod transfer;

pub use bucket::BucketUsage;
pub use record::{CreateVideoRecord, VideoRecord};
pub use signing::{ClockValue, MultipartSession, ObjectSize, SignedPutUrl};
pub use transfer::TransferTarget;
