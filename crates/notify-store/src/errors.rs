//! Store errors.

use thiserror::Error;

/// Errors surfaced by a [`crate::ports::NotificationStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store cannot be reached. Raised by `ping` and by operations
    /// attempted against a dead connection.
    #[error("notification store is unavailable: {0}")]
    Unavailable(String),

    /// The storage engine rejected an operation.
    #[error("storage engine error: {0}")]
    Engine(String),

    /// A persisted record could not be decoded.
    #[error("stored notification record is corrupt: {0}")]
    Corrupt(String),

    /// A notification could not be encoded for storage.
    #[error("failed to encode notification record: {0}")]
    Encode(String),
}
