//! The outbound JSON-LD wire document.
//!
//! A [`WireDocument`] is the literal payload POSTed to a target inbox:
//!
//! ```json
//! {
//!   "@context": ["https://www.w3.org/ns/activitystreams", "https://purl.org/coar/notify"],
//!   "id": "urn:uuid:...",
//!   "origin": {"type": ["Service"], "id": "...", "inbox": "..."},
//!   "actor": {...},
//!   "object": {...},
//!   "context": {...},
//!   "target": {...},
//!   "type": ["Offer", "coar-notify:ReviewAction"]
//! }
//! ```
//!
//! `type` is absent until a pattern method assigns it; `context` is absent
//! when the notification has no context object.

use serde::{Deserialize, Serialize};

use crate::value_objects::{
    NotificationActor, NotificationContext, NotificationObject, NotificationTarget,
    NotificationUrl,
};

/// Activity Streams 2.0 namespace, required in every `@context`.
pub const ACTIVITY_STREAMS_NAMESPACE: &str = "https://www.w3.org/ns/activitystreams";

/// COAR Notify namespace, required in every `@context`.
pub const COAR_NOTIFY_NAMESPACE: &str = "https://purl.org/coar/notify";

/// A service reference as it appears in the `origin` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub id: String,
    pub inbox: String,
}

impl ServiceRef {
    /// A `["Service"]`-typed reference, the only shape the exchange emits.
    pub fn service(id: impl Into<String>, inbox: impl Into<String>) -> Self {
        Self {
            kind: vec!["Service".to_string()],
            id: id.into(),
            inbox: inbox.into(),
        }
    }
}

/// `object` / `context` node carrying the `ietf:cite-as` citation URI and an
/// optional nested URL object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub id: String,
    #[serde(rename = "ietf:cite-as")]
    pub cite_as: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlNode>,
}

/// Nested `url` node of an object or context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlNode {
    pub id: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
}

impl From<&NotificationUrl> for UrlNode {
    fn from(url: &NotificationUrl) -> Self {
        Self {
            id: url.id().to_string(),
            media_type: url.media_type().to_string(),
            kind: url.kind().to_vec(),
        }
    }
}

impl From<&NotificationObject> for ObjectNode {
    fn from(object: &NotificationObject) -> Self {
        Self {
            kind: object.kind().to_vec(),
            id: object.id().to_string(),
            cite_as: object.cite_as().to_string(),
            url: object.url().map(UrlNode::from),
        }
    }
}

impl From<&NotificationContext> for ObjectNode {
    fn from(context: &NotificationContext) -> Self {
        Self {
            kind: context.kind().to_vec(),
            id: context.id().to_string(),
            cite_as: context.cite_as().to_string(),
            url: Some(UrlNode::from(context.url())),
        }
    }
}

/// The full outbound notification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDocument {
    #[serde(rename = "@context")]
    pub ld_context: Vec<String>,
    pub id: String,
    pub origin: ServiceRef,
    pub actor: NotificationActor,
    pub object: ObjectNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ObjectNode>,
    pub target: NotificationTarget,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Vec<String>>,
}

impl WireDocument {
    /// Assemble a document from its building blocks.
    ///
    /// `origin_id` and `origin_inbox` identify the sending service. The
    /// document is not sendable until [`WireDocument::set_kind`] assigns its
    /// activity type.
    pub fn assemble(
        id: impl Into<String>,
        origin_id: impl Into<String>,
        origin_inbox: impl Into<String>,
        actor: NotificationActor,
        object: NotificationObject,
        context: Option<NotificationContext>,
        target: NotificationTarget,
    ) -> Self {
        Self {
            ld_context: vec![
                ACTIVITY_STREAMS_NAMESPACE.to_string(),
                COAR_NOTIFY_NAMESPACE.to_string(),
            ],
            id: id.into(),
            origin: ServiceRef::service(origin_id, origin_inbox),
            actor,
            object: ObjectNode::from(&object),
            context: context.as_ref().map(ObjectNode::from),
            target,
            kind: None,
        }
    }

    /// Set the activity type tags on the document projection.
    pub fn set_kind(&mut self, kind: Vec<String>) {
        self.kind = Some(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document(context: Option<NotificationContext>) -> WireDocument {
        WireDocument::assemble(
            "urn:uuid:00000000-0000-4000-8000-000000000000",
            "https://repo.example.org",
            "https://repo.example.org/inbox",
            NotificationActor::new("https://example.org/alice", "Alice", "Person"),
            NotificationObject::new(
                "https://repo.example.org/item/1",
                "https://doi.org/10.0001/1",
                vec!["Document".to_string()],
            ),
            context,
            NotificationTarget::new("https://journal.example.com", "https://journal.example.com/inbox"),
        )
    }

    #[test]
    fn test_document_field_names() {
        let mut document = sample_document(None);
        document.set_kind(vec!["Offer".to_string(), "coar-notify:ReviewAction".to_string()]);

        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(
            json["@context"][0],
            "https://www.w3.org/ns/activitystreams"
        );
        assert_eq!(json["@context"][1], "https://purl.org/coar/notify");
        assert_eq!(json["origin"]["type"][0], "Service");
        assert_eq!(json["origin"]["inbox"], "https://repo.example.org/inbox");
        assert_eq!(json["object"]["ietf:cite-as"], "https://doi.org/10.0001/1");
        assert_eq!(json["type"][1], "coar-notify:ReviewAction");
    }

    #[test]
    fn test_type_absent_until_assigned() {
        let document = sample_document(None);
        let json = serde_json::to_value(&document).unwrap();

        assert!(json.get("type").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_context_carries_mandatory_url() {
        let context = NotificationContext::new(
            "https://overlay.example.com/reviews/1",
            "https://doi.org/10.0001/r1",
            vec!["Document".to_string()],
            NotificationUrl::new(
                "https://overlay.example.com/reviews/1.html",
                "text/html",
                vec!["Page".to_string()],
            ),
        );
        let document = sample_document(Some(context));
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["context"]["url"]["mediaType"], "text/html");
    }

    #[test]
    fn test_round_trip() {
        let mut document = sample_document(None);
        document.set_kind(vec!["Accept".to_string()]);

        let encoded = serde_json::to_string(&document).unwrap();
        let decoded: WireDocument = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, document);
    }
}
