//! Environment-driven runtime configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NOTIFY_BIND_ADDR` | `0.0.0.0:8008` | Inbox listen address |
//! | `NOTIFY_DATA_DIR` | `./data/notifications` | RocksDB directory |
//! | `NOTIFY_ID` | (required) | Service identity URI |
//! | `NOTIFY_INBOX_URL` | (required) | Public inbox URL |
//! | `NOTIFY_CONNECT_TIMEOUT_SECS` | `5` | Outbound connect timeout |
//! | `NOTIFY_REQUEST_TIMEOUT_SECS` | `20` | Outbound request timeout |
//! | `NOTIFY_USER_AGENT` | library default | Outbound User-Agent |
//! | `NOTIFY_EXPOSE_LISTING` | `false` | Serve GET /inbox listing |
//! | `RUST_LOG` | `info` | tracing filter |

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use notify_inbox::ManagerConfig;

/// Full runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Socket address the inbox listens on.
    pub bind_addr: String,
    /// RocksDB data directory.
    pub data_dir: String,
    /// Manager-level configuration.
    pub manager: ManagerConfig,
}

impl RuntimeConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let id = match env::var("NOTIFY_ID") {
            Ok(id) if !id.is_empty() => id,
            _ => bail!("NOTIFY_ID must be set to this service's identity URI"),
        };
        let inbox_url = match env::var("NOTIFY_INBOX_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => bail!("NOTIFY_INBOX_URL must be set to this service's public inbox URL"),
        };

        let mut manager = ManagerConfig::new(id, inbox_url);
        manager.connect_timeout =
            Duration::from_secs(env_u64("NOTIFY_CONNECT_TIMEOUT_SECS", 5)?);
        manager.request_timeout =
            Duration::from_secs(env_u64("NOTIFY_REQUEST_TIMEOUT_SECS", 20)?);
        if let Ok(user_agent) = env::var("NOTIFY_USER_AGENT") {
            manager.user_agent = user_agent;
        }
        manager.expose_listing = env_bool("NOTIFY_EXPOSE_LISTING", false)?;

        Ok(Self {
            bind_addr: env::var("NOTIFY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8008".to_string()),
            data_dir: env::var("NOTIFY_DATA_DIR")
                .unwrap_or_else(|_| "./data/notifications".to_string()),
            manager,
        })
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} must be an integer, got '{value}'")),
        Err(_) => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => match value.as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => bail!("{name} must be a boolean, got '{other}'"),
        },
        Err(_) => Ok(default),
    }
}
