//! Error types for topology decoding

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Topology-related errors
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration body is not a valid terse bucket configuration.
    #[error("malformed bucket configuration: {0}")]
    Json(#[from] serde_json::Error),
}
