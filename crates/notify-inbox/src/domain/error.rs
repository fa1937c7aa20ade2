//! Service errors and their HTTP projection.
//!
//! Validation and decode errors are resolved at the HTTP boundary and
//! never propagate past it. Delivery failures are not errors at all; they
//! are captured into the envelope status.

use notify_store::StoreError;
use notify_types::EnvelopeError;
use thiserror::Error;

use crate::domain::config::ConfigError;

/// Errors raised by the notification manager.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The request body is not valid JSON. Surfaced as HTTP 400.
    #[error("badly formed JSON in payload: {0}")]
    MalformedPayload(String),

    /// Structurally well-formed but missing required properties. Surfaced
    /// as HTTP 422.
    #[error("invalid notification: {0}")]
    Validation(String),

    /// The notification store is unreachable or not configured. Raised
    /// before any partial work is performed.
    #[error("a live notification store connection is required")]
    NoDatabase,

    /// Envelope construction failed (empty id or type).
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid manager configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP delivery client: {0}")]
    HttpClient(String),
}

impl NotifyError {
    /// The HTTP status an inbound request failing with this error gets.
    pub fn http_status(&self) -> u16 {
        match self {
            NotifyError::MalformedPayload(_) => 400,
            NotifyError::Validation(_) | NotifyError::Envelope(_) | NotifyError::Store(_) => 422,
            NotifyError::NoDatabase | NotifyError::Config(_) | NotifyError::HttpClient(_) => 500,
        }
    }
}
