//! Value objects embedded in notification documents.
//!
//! Each descriptor is immutable after construction and is owned by the
//! envelope that embeds it. Serialisation matches the COAR Notify wire
//! vocabulary, including the `ietf:cite-as` and `mediaType` property names.

use serde::{Deserialize, Serialize};

/// The party a notification acts on behalf of, e.g. a person or a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationActor {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

impl NotificationActor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// A dereferenceable representation of an object, e.g. a landing page or a
/// bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationUrl {
    id: String,
    #[serde(rename = "mediaType")]
    media_type: String,
    #[serde(rename = "type")]
    kind: Vec<String>,
}

impl NotificationUrl {
    pub fn new(
        id: impl Into<String>,
        media_type: impl Into<String>,
        kind: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            media_type: media_type.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn kind(&self) -> &[String] {
        &self.kind
    }
}

/// The scholarly object a notification is about.
///
/// `cite_as` serialises as `ietf:cite-as`, the persistent citation URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationObject {
    id: String,
    cite_as: String,
    kind: Vec<String>,
    url: Option<NotificationUrl>,
}

impl NotificationObject {
    pub fn new(
        id: impl Into<String>,
        cite_as: impl Into<String>,
        kind: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            cite_as: cite_as.into(),
            kind,
            url: None,
        }
    }

    /// Attach a dereferenceable URL to the object.
    pub fn with_url(mut self, url: NotificationUrl) -> Self {
        self.url = Some(url);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cite_as(&self) -> &str {
        &self.cite_as
    }

    pub fn kind(&self) -> &[String] {
        &self.kind
    }

    pub fn url(&self) -> Option<&NotificationUrl> {
        self.url.as_ref()
    }
}

/// The object providing context for the notification, e.g. the item a
/// review is about. Structurally a [`NotificationObject`] whose URL is
/// mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContext {
    id: String,
    cite_as: String,
    kind: Vec<String>,
    url: NotificationUrl,
}

impl NotificationContext {
    pub fn new(
        id: impl Into<String>,
        cite_as: impl Into<String>,
        kind: Vec<String>,
        url: NotificationUrl,
    ) -> Self {
        Self {
            id: id.into(),
            cite_as: cite_as.into(),
            kind,
            url,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cite_as(&self) -> &str {
        &self.cite_as
    }

    pub fn kind(&self) -> &[String] {
        &self.kind
    }

    pub fn url(&self) -> &NotificationUrl {
        &self.url
    }
}

/// The service a notification is delivered to. `inbox` is the LDN delivery
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    id: String,
    inbox: String,
    #[serde(rename = "type")]
    kind: String,
}

impl NotificationTarget {
    /// Target with the default `"Service"` type.
    pub fn new(id: impl Into<String>, inbox: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inbox: inbox.into(),
            kind: "Service".to_string(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inbox(&self) -> &str {
        &self.inbox
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}
