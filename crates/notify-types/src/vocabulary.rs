//! Activity Streams 2.0 activity-type vocabulary.
//!
//! Not exhaustive of the full AS2.0 ontology, only the activity types. The
//! list is kept lower-case; callers compare case-insensitively.
//!
//! See <https://www.w3.org/TR/activitystreams-vocabulary/#activity-types>.

/// Canonical AS2.0 activity types, lower-cased.
pub const ACTIVITIES: [&str; 28] = [
    "accept",
    "add",
    "announce",
    "arrive",
    "block",
    "create",
    "delete",
    "dislike",
    "flag",
    "follow",
    "ignore",
    "invite",
    "join",
    "leave",
    "like",
    "listen",
    "move",
    "offer",
    "question",
    "reject",
    "read",
    "remove",
    "tentativereject",
    "tentativeaccept",
    "travel",
    "undo",
    "update",
    "view",
];

/// Whether at least one of `tags` is a canonical AS2.0 activity type.
///
/// A notification can be of more than one type and at least one should be
/// an Activity Streams 2.0 activity type. This check is advisory only.
pub fn includes_activity_type(tags: &[String]) -> bool {
    tags.iter()
        .any(|tag| ACTIVITIES.contains(&tag.to_lowercase().as_str()))
}
