//! Outbound ports of the exchange service.

use async_trait::async_trait;

/// Abstract interface for delivering a serialised notification to a peer
/// inbox.
///
/// Production: [`crate::adapters::http_delivery::HttpDeliverySink`]
///
/// A delivery never fails the caller. The returned code is either the HTTP
/// status of the peer's response (4xx/5xx included) or a sub-100 transport
/// error code; it is recorded on the envelope as the single observable
/// outcome of the send.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// POST `body` to `inbox_url` and report the outcome code.
    async fn deliver(&self, inbox_url: &str, body: &str) -> i32;
}
