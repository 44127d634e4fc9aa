//! The content snapshot passed to the lifecycle hooks.
//!
//! The notifier never owns or persists an [`EventRecord`]; the host hands one
//! over for the duration of a single hook call.

use serde::{Deserialize, Deserializer, Serialize};

/// Content type (bundle) name the notifier reacts to.
pub const CONTENT_TYPE_EVENT: &str = "event";

// ---------------------------------------------------------------------------
// EventRecord
// ---------------------------------------------------------------------------

/// A snapshot of a content record at hook time.
///
/// Constructed via [`EventRecord::new`] and enriched with the builder
/// methods. Every field has a default so that partial payloads from the host
/// deserialize; a missing or `null` title becomes the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    /// Content type of the record, e.g. `"event"` or `"article"`.
    #[serde(deserialize_with = "null_as_default")]
    pub content_type: String,

    /// Record title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,

    /// Whether the record is currently published.
    #[serde(deserialize_with = "null_as_default")]
    pub is_published: bool,

    /// Event start date as supplied by the host (ISO-8601 text).
    pub event_date: Option<String>,

    /// Free-text event location.
    pub location: Option<String>,

    /// Body text of the record.
    pub body_text: Option<String>,

    /// Absolute URL of the record on the public site.
    #[serde(deserialize_with = "null_as_default")]
    pub canonical_url: String,

    /// Snapshot before the current save. Only present on updates.
    pub previous_state: Option<Box<EventRecord>>,
}

/// Hosts send `null` for unset fields; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventRecord {
    /// Create an unpublished `event` record with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            content_type: CONTENT_TYPE_EVENT.to_string(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Override the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the published flag.
    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    /// Attach the event date.
    pub fn with_event_date(mut self, date: impl Into<String>) -> Self {
        self.event_date = Some(date.into());
        self
    }

    /// Attach the event location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach body text.
    pub fn with_body_text(mut self, body: impl Into<String>) -> Self {
        self.body_text = Some(body.into());
        self
    }

    /// Set the canonical URL.
    pub fn with_canonical_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = url.into();
        self
    }

    /// Attach the pre-update snapshot.
    pub fn with_previous_state(mut self, previous: EventRecord) -> Self {
        self.previous_state = Some(Box::new(previous));
        self
    }

    /// Whether this record is of the `event` content type.
    pub fn is_event(&self) -> bool {
        self.content_type == CONTENT_TYPE_EVENT
    }

    /// Whether this save moved the record from unpublished to published.
    ///
    /// Requires the previous snapshot; without it no transition can be
    /// detected and `false` is returned.
    pub fn is_publish_transition(&self) -> bool {
        match &self.previous_state {
            Some(previous) => !previous.is_published && self.is_published,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
