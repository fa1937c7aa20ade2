//! Manager configuration with validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only content type the inbox accepts and the exchange emits.
pub const LD_JSON_CONTENT_TYPE: &str = "application/ld+json";

/// Configuration for a [`crate::service::NotificationManager`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// URI identifying this service, used as `origin.id` and `fromId` of
    /// every outbound notification.
    pub id: String,
    /// Public URL of this service's inbox, used as `origin.inbox`.
    pub inbox_url: String,
    /// Connect timeout for outbound deliveries.
    pub connect_timeout: Duration,
    /// Overall request timeout for outbound deliveries. Kept separate from
    /// the connect timeout; defaults to a generous multiple of it.
    pub request_timeout: Duration,
    /// User-Agent header sent with outbound deliveries.
    pub user_agent: String,
    /// Serve an LDP listing of stored inbound ids on `GET /inbox` instead
    /// of the write-only 403.
    pub expose_listing: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            inbox_url: String::new(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(20),
            user_agent: "Rust COAR Notification Manager".to_string(),
            expose_listing: false,
        }
    }
}

impl ManagerConfig {
    /// Config with the given service identity and inbox URL, defaults
    /// elsewhere.
    pub fn new(id: impl Into<String>, inbox_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inbox_url: inbox_url.into(),
            ..Default::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if self.inbox_url.is_empty() {
            return Err(ConfigError::EmptyInboxUrl);
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("connect_timeout"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("request_timeout"));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("manager id cannot be empty")]
    EmptyId,

    #[error("inbox URL cannot be empty")]
    EmptyInboxUrl,

    #[error("{0} cannot be zero")]
    ZeroTimeout(&'static str),
}
