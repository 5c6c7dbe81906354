//! Error type for task storage.

use thiserror::Error;

/// Failures while persisting the task collection.
///
/// Reading never produces one of these: an absent or unreadable collection
/// loads as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
