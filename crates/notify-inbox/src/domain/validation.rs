//! Inbound structural validation gates.
//!
//! A received body passes Received → Decoded → Validated before an
//! envelope is constructed from it. These checks are structural only: the
//! `@context` property must name both required namespaces and `id` must be
//! present and non-empty. No semantic vocabulary validation happens here.

use serde_json::Value;

use crate::domain::error::NotifyError;

/// Authority+path of the Activity Streams 2.0 namespace; either URI scheme
/// is accepted.
const ACTIVITY_STREAMS_AUTHORITY: &str = "www.w3.org/ns/activitystreams";

/// Authority+path of the COAR Notify namespace; either URI scheme is
/// accepted.
const COAR_NOTIFY_AUTHORITY: &str = "purl.org/coar/notify";

/// Decode a raw inbound body. Gate: Received → Decoded.
pub fn decode(body: &str) -> Result<Value, NotifyError> {
    serde_json::from_str(body).map_err(|e| NotifyError::MalformedPayload(e.to_string()))
}

/// Structural acceptance checks. Gate: Decoded → Validated.
pub fn validate_notification(document: &Value) -> Result<(), NotifyError> {
    let Some(ld_context) = document.get("@context") else {
        return Err(NotifyError::Validation(
            "the notification must include an '@context' property".to_string(),
        ));
    };

    let entries = ld_context.as_array().ok_or_else(|| {
        NotifyError::Validation("the '@context' property must be an array".to_string())
    })?;

    if !entries
        .iter()
        .any(|entry| matches_namespace(entry, ACTIVITY_STREAMS_AUTHORITY))
    {
        return Err(NotifyError::Validation(
            "the '@context' property must include Activity Streams 2.0 \
             (https://www.w3.org/ns/activitystreams)"
                .to_string(),
        ));
    }

    if !entries
        .iter()
        .any(|entry| matches_namespace(entry, COAR_NOTIFY_AUTHORITY))
    {
        return Err(NotifyError::Validation(
            "the '@context' property must include Notify (https://purl.org/coar/notify)"
                .to_string(),
        ));
    }

    match document.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(NotifyError::Validation("id is empty".to_string())),
    }
}

fn matches_namespace(entry: &Value, authority: &str) -> bool {
    entry.as_str().is_some_and(|uri| {
        uri.strip_prefix("https://")
            .or_else(|| uri.strip_prefix("http://"))
            .is_some_and(|rest| rest == authority)
    })
}
