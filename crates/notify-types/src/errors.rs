//! Envelope construction errors.
//!
//! Only hard invariant violations live here. Advisory checks (unrecognised
//! activity vocabulary, unusual id shapes) log warnings and never fail.

use thiserror::Error;

/// Errors raised while building or mutating a notification envelope.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The notification id resolved to the empty string.
    #[error("notification id can not be empty")]
    EmptyId,

    /// `set_type` was called with no tags.
    #[error("notification type can not be empty")]
    EmptyType,

    /// The original document could not be serialised.
    #[error("failed to serialise notification document: {0}")]
    Serialize(#[from] serde_json::Error),
}
