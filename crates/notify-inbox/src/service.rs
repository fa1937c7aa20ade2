//! Notification manager service.
//!
//! Ties the envelope aggregate to the store and the delivery sink. All
//! collaborators arrive through the constructor; there are no process-wide
//! singletons. The constructor verifies the store connection and fails
//! fast when it is unreachable.

use std::sync::Arc;

use notify_store::{NotificationStore, DEFAULT_LIST_LIMIT};
use notify_types::{
    Direction, Notification, NotificationActor, NotificationContext, NotificationObject,
    NotificationTarget,
};
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::config::ManagerConfig;
use crate::domain::error::NotifyError;
use crate::domain::validation;
use crate::ports::DeliverySink;

/// A manager can either receive or send COAR notifications.
pub struct NotificationManager {
    config: ManagerConfig,
    store: Arc<dyn NotificationStore>,
    delivery: Arc<dyn DeliverySink>,
}

impl NotificationManager {
    /// Construct a manager, verifying the store connection.
    pub fn new(
        config: ManagerConfig,
        store: Arc<dyn NotificationStore>,
        delivery: Arc<dyn DeliverySink>,
    ) -> Result<Self, NotifyError> {
        config.validate()?;

        store.ping().map_err(|e| {
            error!("couldn't establish a notification store connection: {e}");
            NotifyError::NoDatabase
        })?;
        debug!("notification store connection verified");

        Ok(Self {
            config,
            store,
            delivery,
        })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // =========================================================================
    // INBOUND: Received → Decoded → Validated → Persisted
    // =========================================================================

    /// Run an inbound body through the acceptance state machine.
    ///
    /// Returns the persisted envelope; the error's `http_status` is the
    /// response code for the failing gate (400 bad JSON, 422 otherwise).
    pub fn receive(&self, body: &str) -> Result<Notification, NotifyError> {
        let document = validation::decode(body).inspect_err(|e| error!("syntax error: {e}"))?;

        validation::validate_notification(&document).inspect_err(|e| error!("{e}"))?;

        let mut envelope =
            Notification::inbound(&document).inspect_err(|e| error!("{e}"))?;

        self.store.persist(&mut envelope).inspect_err(|e| error!("{e}"))?;
        info!(id = %envelope.id(), "wrote inbound notification to database");
        Ok(envelope)
    }

    /// Fetch a stored notification by id.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Notification>, NotifyError> {
        Ok(self.store.get_by_id(id)?)
    }

    /// Delete a stored notification by id.
    pub fn remove_by_id(&self, id: &str) -> Result<bool, NotifyError> {
        Ok(self.store.remove_by_id(id)?)
    }

    /// LDP-style listing of stored inbound notifications, newest first.
    pub fn inbound_listing(&self) -> Result<serde_json::Value, NotifyError> {
        let stored = self
            .store
            .list_by_direction(Direction::Inbound, DEFAULT_LIST_LIMIT)?;

        let inbox_url = self.config.inbox_url.trim_end_matches('/');
        let contains: Vec<String> = stored
            .iter()
            .map(|n| {
                let suffix = n.id().strip_prefix("urn:uuid:").unwrap_or(n.id());
                format!("{inbox_url}/{suffix}")
            })
            .collect();

        Ok(json!({
            "@context": "http://www.w3.org/ns/ldp",
            "@id": self.config.id,
            "contains": contains,
        }))
    }

    // =========================================================================
    // OUTBOUND: construction, patterns, delivery
    // =========================================================================

    /// Assemble an outbound envelope from its value objects.
    ///
    /// The envelope is not sendable until one of the pattern methods
    /// assigns its activity type.
    pub fn create_outbound(
        &self,
        actor: NotificationActor,
        object: NotificationObject,
        context: Option<NotificationContext>,
        target: NotificationTarget,
    ) -> Result<Notification, NotifyError> {
        Ok(Notification::outbound(
            &self.config.id,
            &self.config.inbox_url,
            actor,
            object,
            context,
            target,
        )?)
    }

    /// Acknowledge a request and accept it.
    pub async fn acknowledge_and_accept(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(notification, in_reply_to, &["Accept"]).await
    }

    /// Acknowledge a request and reject it.
    pub async fn acknowledge_and_reject(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(notification, in_reply_to, &["Reject"]).await
    }

    /// Announce that an endorsement was published.
    pub async fn announce_endorsement(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Announce", "coar-notify:EndorsementAction"],
        )
        .await
    }

    /// Announce that a resource was ingested.
    pub async fn announce_ingest(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Announce", "coar-notify:IngestAction"],
        )
        .await
    }

    /// Announce a relationship between resources.
    pub async fn announce_relationship(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Announce", "coar-notify:RelationshipAction"],
        )
        .await
    }

    /// Announce that a review was published.
    pub async fn announce_review(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Announce", "coar-notify:ReviewAction"],
        )
        .await
    }

    /// Request endorsement of a resource.
    pub async fn request_endorsement(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Offer", "coar-notify:EndorsementAction"],
        )
        .await
    }

    /// Request ingest of a resource.
    pub async fn request_ingest(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Offer", "coar-notify:IngestAction"],
        )
        .await
    }

    /// Request review of a resource, with possible endorsement.
    pub async fn request_review(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(
            notification,
            in_reply_to,
            &["Offer", "coar-notify:ReviewAction"],
        )
        .await
    }

    /// Retract a previously sent offer.
    pub async fn retract_offer(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.dispatch(notification, in_reply_to, &["Undo"]).await
    }

    /// Common pattern shape: store-liveness gate, reply chaining, type
    /// assignment, delivery, persist.
    async fn dispatch(
        &self,
        notification: &mut Notification,
        in_reply_to: Option<&str>,
        kind: &[&str],
    ) -> Result<(), NotifyError> {
        if self.store.ping().is_err() {
            return Err(NotifyError::NoDatabase);
        }

        if let Some(reply_to) = in_reply_to.filter(|id| !id.is_empty()) {
            notification.set_in_reply_to(reply_to);
        }

        notification.set_type(kind.iter().map(|tag| tag.to_string()).collect())?;
        notification.capture_document()?;

        self.deliver_and_record(notification).await;
        self.persist_outbound(notification);
        Ok(())
    }

    /// Single delivery call site. A retry policy, if one is ever wanted,
    /// wraps this and nothing else.
    async fn deliver_and_record(&self, notification: &mut Notification) {
        let Some(inbox_url) = notification.target_url().map(str::to_string) else {
            return;
        };

        let status = self.delivery.deliver(&inbox_url, notification.original()).await;
        notification.set_status(status);
    }

    /// Outbound persistence failures are logged only; the delivery outcome
    /// is already captured on the envelope.
    fn persist_outbound(&self, notification: &mut Notification) {
        match self.store.persist(notification) {
            Ok(()) => {
                let qualifier = match notification.status() {
                    Some(status) if (200..300).contains(&status) => "",
                    _ => "failed ",
                };
                info!(
                    id = %notification.id(),
                    "wrote {qualifier}outbound notification to database"
                );
            }
            Err(e) => error!(id = %notification.id(), "{e}"),
        }
    }
}
