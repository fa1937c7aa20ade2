//! HTTP delivery adapter.
//!
//! POSTs the serialised wire document to the target inbox. Any HTTP
//! response, success or failure class, is reported as its numeric status;
//! transport-level failures map to sub-100 codes. Nothing escapes this
//! boundary as an error.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error};

use crate::domain::config::{ManagerConfig, LD_JSON_CONTENT_TYPE};
use crate::domain::error::NotifyError;
use crate::ports::DeliverySink;

/// Transport-level failure codes recorded in place of an HTTP status.
///
/// Numbering follows libcurl so stored status columns stay comparable
/// across deployments. See <https://curl.se/libcurl/c/libcurl-errors.html>.
pub mod transport_code {
    /// The send failed for a reason other than the ones below.
    pub const SEND_FAILED: i32 = 1;
    /// The target inbox could not be connected to.
    pub const CONNECT_FAILED: i32 = 7;
    /// The delivery exceeded a configured timeout.
    pub const TIMED_OUT: i32 = 28;
}

/// reqwest-backed [`DeliverySink`].
pub struct HttpDeliverySink {
    client: Client,
}

impl HttpDeliverySink {
    /// Build a client honouring the manager's timeouts and user agent.
    pub fn new(config: &ManagerConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NotifyError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DeliverySink for HttpDeliverySink {
    async fn deliver(&self, inbox_url: &str, body: &str) -> i32 {
        let result = self
            .client
            .post(inbox_url)
            .header(CONTENT_TYPE, LD_JSON_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = i32::from(response.status().as_u16());
                debug!(inbox = %inbox_url, status, "notification delivered");
                status
            }
            Err(e) if e.is_connect() => {
                error!(inbox = %inbox_url, "notification could not be sent, couldn't connect to {inbox_url}");
                transport_code::CONNECT_FAILED
            }
            Err(e) if e.is_timeout() => {
                error!(inbox = %inbox_url, "notification could not be sent, timed out");
                transport_code::TIMED_OUT
            }
            Err(e) => {
                error!(inbox = %inbox_url, error = %e, "notification could not be sent");
                transport_code::SEND_FAILED
            }
        }
    }
}
