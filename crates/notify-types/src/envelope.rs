//! The notification envelope aggregate.
//!
//! One [`Notification`] type covers both directions of the exchange. An
//! inbound envelope is decoded from an accepted POST body; an outbound
//! envelope additionally carries an [`OutboundDetails`] extension holding
//! the wire document and the delivery target. The extension is runtime
//! state only and is never persisted; the store sees the flat record
//! (id, fromId, toId, inReplyToId, type, status, timestamp, original,
//! direction).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::errors::EnvelopeError;
use crate::value_objects::{
    NotificationActor, NotificationContext, NotificationObject, NotificationTarget,
};
use crate::vocabulary;
use crate::wire::WireDocument;

/// Storage discriminator. An envelope is exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "INBOUND"),
            Direction::Outbound => write!(f, "OUTBOUND"),
        }
    }
}

/// Outbound-only extension: the wire document and where to deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundDetails {
    document: WireDocument,
    target_inbox: String,
}

impl OutboundDetails {
    pub fn document(&self) -> &WireDocument {
        &self.document
    }

    pub fn target_inbox(&self) -> &str {
        &self.target_inbox
    }
}

/// A COAR Notify notification, inbound or outbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: String,
    from_id: String,
    to_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    in_reply_to_id: Option<String>,
    #[serde(rename = "type")]
    kind: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    original: String,
    direction: Direction,
    #[serde(skip)]
    outbound: Option<OutboundDetails>,
}

impl Notification {
    fn empty(direction: Direction) -> Self {
        Self {
            id: String::new(),
            from_id: String::new(),
            to_id: String::new(),
            in_reply_to_id: None,
            kind: Vec::new(),
            status: None,
            timestamp: None,
            original: String::new(),
            direction,
            outbound: None,
        }
    }

    /// Build an inbound envelope from an already validated JSON document.
    ///
    /// `fromId`/`toId` are taken from `origin.id`/`target.id` when present.
    /// The full document is kept verbatim as the original payload and the
    /// receipt status is 201.
    pub fn inbound(document: &Value) -> Result<Self, EnvelopeError> {
        let mut envelope = Self::empty(Direction::Inbound);

        let id = document.get("id").and_then(Value::as_str).unwrap_or("");
        envelope.set_id(Some(id))?;

        envelope.from_id = json_str(document, "/origin/id");
        envelope.to_id = json_str(document, "/target/id");

        let tags: Vec<String> = document
            .get("type")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if !tags.is_empty() {
            envelope.set_type(tags)?;
        }

        envelope.set_original(document)?;
        envelope.set_status(201);
        Ok(envelope)
    }

    /// Build an outbound envelope from its value objects.
    ///
    /// A fresh `urn:uuid` id is generated, `fromId` is the sending service
    /// and `toId` the target service. The envelope is not sendable until a
    /// pattern method assigns its activity type.
    pub fn outbound(
        origin_id: &str,
        origin_inbox: &str,
        actor: NotificationActor,
        object: NotificationObject,
        context: Option<NotificationContext>,
        target: NotificationTarget,
    ) -> Result<Self, EnvelopeError> {
        let mut envelope = Self::empty(Direction::Outbound);
        envelope.set_id(None)?;
        envelope.from_id = origin_id.to_string();
        envelope.to_id = target.id().to_string();

        let target_inbox = target.inbox().to_string();
        let document = WireDocument::assemble(
            envelope.id.clone(),
            origin_id,
            origin_inbox,
            actor,
            object,
            context,
            target,
        );
        envelope.outbound = Some(OutboundDetails {
            document,
            target_inbox,
        });
        Ok(envelope)
    }

    /// Assign or generate the envelope id.
    ///
    /// With no current id and no (or an empty) argument a fresh
    /// `urn:uuid:<v4>` is generated; otherwise the argument is assigned
    /// verbatim. An id that is neither a v4 URN-UUID nor a syntactically
    /// valid absolute URL is recorded with a warning but accepted.
    pub fn set_id(&mut self, id: Option<&str>) -> Result<(), EnvelopeError> {
        let supplied = id.unwrap_or("");
        let id = if supplied.is_empty() && self.id.is_empty() {
            format!("urn:uuid:{}", Uuid::new_v4())
        } else {
            supplied.to_string()
        };

        if id.is_empty() {
            return Err(EnvelopeError::EmptyId);
        }

        if !is_urn_uuid_v4(&id) && Url::parse(&id).is_err() {
            warn!(id = %id, "notification id is neither a valid URL nor an UUID");
        }

        self.id = id;
        Ok(())
    }

    /// Assign the activity type tags.
    ///
    /// The tags land both on the envelope record and, for outbound
    /// envelopes, on the wire-document projection. Missing AS2.0 coverage
    /// is advisory only.
    pub fn set_type(&mut self, kind: Vec<String>) -> Result<(), EnvelopeError> {
        if kind.is_empty() {
            return Err(EnvelopeError::EmptyType);
        }

        if !vocabulary::includes_activity_type(&kind) {
            warn!(
                id = %self.id,
                "notification does not have an Activity Streams 2.0 activity type"
            );
        }

        if let Some(outbound) = self.outbound.as_mut() {
            outbound.document.set_kind(kind.clone());
        }
        self.kind = kind;
        Ok(())
    }

    /// Store the serialised document this envelope represents, verbatim.
    ///
    /// Called once, after all other fields are set, immediately before a
    /// send or persist.
    pub fn set_original(&mut self, document: &impl Serialize) -> Result<(), EnvelopeError> {
        self.original = serde_json::to_string(document)?;
        Ok(())
    }

    /// Capture the current outbound wire document as the original payload.
    ///
    /// No-op for inbound envelopes, whose original is the received body.
    pub fn capture_document(&mut self) -> Result<(), EnvelopeError> {
        if let Some(outbound) = &self.outbound {
            self.original = serde_json::to_string(outbound.document())?;
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    pub fn in_reply_to(&self) -> Option<&str> {
        self.in_reply_to_id.as_deref()
    }

    /// Chain this envelope to a prior notification id.
    pub fn set_in_reply_to(&mut self, id: impl Into<String>) {
        self.in_reply_to_id = Some(id.into());
    }

    pub fn kind(&self) -> &[String] {
        &self.kind
    }

    /// The serialised form of the type tags, as persisted and compared.
    pub fn type_json(&self) -> String {
        serde_json::to_string(&self.kind).unwrap_or_else(|_| "[]".to_string())
    }

    /// Delivery outcome: an HTTP status code, a transport error code, or
    /// `None` when never sent.
    pub fn status(&self) -> Option<i32> {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = Some(status);
    }

    /// Modification time, assigned by the store on every persist.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = Some(timestamp);
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The wire document, outbound envelopes only.
    pub fn document(&self) -> Option<&WireDocument> {
        self.outbound.as_ref().map(OutboundDetails::document)
    }

    /// The target inbox URL, outbound envelopes only.
    pub fn target_url(&self) -> Option<&str> {
        self.outbound.as_ref().map(OutboundDetails::target_inbox)
    }

    /// The serialised wire document used as the POST body.
    pub fn wire_json(&self) -> Result<Option<String>, EnvelopeError> {
        match &self.outbound {
            Some(outbound) => Ok(Some(serde_json::to_string(outbound.document())?)),
            None => Ok(None),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

fn json_str(document: &Value, pointer: &str) -> String {
    document
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn is_urn_uuid_v4(id: &str) -> bool {
    id.strip_prefix("urn:uuid:")
        .and_then(|suffix| Uuid::parse_str(suffix).ok())
        .map(|uuid| uuid.get_version_num() == 4)
        .unwrap_or(false)
}
