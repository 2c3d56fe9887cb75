//! Vodvault Core Library
//!
//! This crate provides the shared types used across all vodvault components:
//! error taxonomy, transfer policy constants, the content-type allow-list,
//! progress reporting, configuration, and serde models.

pub mod config;
pub mod constants;
pub mod content_type;
pub mod error;
pub mod models;
pub mod progress;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use content_type::content_type_for_key;
pub use error::{VaultError, VaultResult};
pub use progress::{ProgressFn, ProgressReporter};
