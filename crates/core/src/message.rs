//! Email content for event notifications.
//!
//! [`build_body`] is a pure formatter; [`render_mail`] is the hook the mail
//! gateway invokes to turn [`MailParams`] into a [`NotificationMessage`].

use serde::{Deserialize, Serialize};

use crate::content::EventRecord;
use crate::settings::NotificationType;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Module name the notifier sends mail under.
pub const MAIL_MODULE: &str = "event_notifier";

/// Template key for event notifications.
pub const MAIL_KEY_EVENT_NOTIFICATION: &str = "event_notification";

// ---------------------------------------------------------------------------
// NotificationAction
// ---------------------------------------------------------------------------

/// What happened to the event, as reported in the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    Created,
    Published,
}

impl NotificationAction {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Published => "published",
        }
    }

    /// Verb used in the body's opening sentence.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Published => "published",
        }
    }

    /// The settings checkbox that gates this action.
    pub fn notification_type(&self) -> NotificationType {
        match self {
            Self::Created => NotificationType::Created,
            Self::Published => NotificationType::Published,
        }
    }
}

impl std::fmt::Display for NotificationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Message and params
// ---------------------------------------------------------------------------

/// A rendered email. Built per send, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub subject: String,
    /// Body paragraphs; transports join them with blank lines.
    pub body: Vec<String>,
}

impl NotificationMessage {
    /// Whether the render hook left the message untouched.
    pub fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.body.is_empty()
    }

    /// The body as a single plain-text string.
    pub fn body_text(&self) -> String {
        self.body.join("\n\n")
    }
}

/// Parameters handed from the dispatcher to the mail gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailParams {
    pub subject: String,
    pub action: NotificationAction,
    pub node: EventRecord,
}

impl MailParams {
    /// Params for notifying about `record`, with the standard subject line.
    pub fn for_record(action: NotificationAction, record: &EventRecord) -> Self {
        Self {
            subject: build_subject(action, record),
            action,
            node: record.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Subject line, e.g. `Event Created: Tech Conference 2024`.
pub fn build_subject(action: NotificationAction, record: &EventRecord) -> String {
    format!("{}: {}", action.notification_type().label(), record.title)
}

/// Plain-text body for an event notification.
///
/// Date and location lines are omitted entirely when the record lacks them.
pub fn build_body(action: NotificationAction, record: &EventRecord) -> String {
    let mut lines = vec![
        format!("An event has been {} on the website.", action.phrase()),
        String::new(),
        format!("Title: {}", record.title),
    ];

    if let Some(date) = &record.event_date {
        lines.push(format!("Date: {date}"));
    }
    if let Some(location) = &record.location {
        lines.push(format!("Location: {location}"));
    }

    lines.push(String::new());
    lines.push(format!("View the event: {}", record.canonical_url));

    lines.join("\n")
}

/// Mail render hook.
///
/// Fills `message` for the [`MAIL_KEY_EVENT_NOTIFICATION`] template; any
/// other key leaves it untouched.
pub fn render_mail(key: &str, message: &mut NotificationMessage, params: &MailParams) {
    if key == MAIL_KEY_EVENT_NOTIFICATION {
        message.subject = params.subject.clone();
        message.body = vec![build_body(params.action, &params.node)];
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn conference() -> EventRecord {
        EventRecord::new("Tech Conference 2024")
            .published(true)
            .with_event_date("2024-06-15T09:00:00")
            .with_location("Test Location")
            .with_canonical_url("http://example.com/node/1")
    }

    #[test]
    fn body_contains_all_fields() {
        let body = build_body(NotificationAction::Created, &conference());

        assert!(body.contains("An event has been created"));
        assert!(body.contains("Title: Tech Conference 2024"));
        assert!(body.contains("Date: 2024-06-15T09:00:00"));
        assert!(body.contains("Location: Test Location"));
        assert!(body.contains("View the event: http://example.com/node/1"));
    }

    #[test]
    fn body_layout_is_stable() {
        let body = build_body(NotificationAction::Published, &conference());
        assert_eq!(
            body,
            "An event has been published on the website.\n\
             \n\
             Title: Tech Conference 2024\n\
             Date: 2024-06-15T09:00:00\n\
             Location: Test Location\n\
             \n\
             View the event: http://example.com/node/1"
        );
    }

    #[test]
    fn body_omits_missing_optional_lines() {
        let record = EventRecord::new("Bare").with_canonical_url("http://example.com/node/2");
        let body = build_body(NotificationAction::Created, &record);

        assert!(!body.contains("Date:"));
        assert!(!body.contains("Location:"));
        assert!(!body.contains("\n\n\n"));
    }

    #[test]
    fn body_with_empty_title() {
        let body = build_body(NotificationAction::Created, &EventRecord::new(""));
        assert!(body.contains("Title: \n"));
    }

    #[test]
    fn subject_names_action_and_title() {
        assert_eq!(
            build_subject(NotificationAction::Published, &conference()),
            "Event Published: Tech Conference 2024"
        );
    }

    #[test]
    fn subject_capitalizes_created() {
        assert_eq!(
            build_subject(NotificationAction::Created, &EventRecord::new("Test Event")),
            "Event Created: Test Event"
        );
    }

    #[test]
    fn render_mail_fills_event_notification() {
        let params = MailParams {
            subject: "S".to_string(),
            action: NotificationAction::Created,
            node: conference(),
        };
        let mut message = NotificationMessage::default();

        render_mail(MAIL_KEY_EVENT_NOTIFICATION, &mut message, &params);

        assert_eq!(message.subject, "S");
        assert_eq!(message.body.len(), 1);
        assert!(message.body[0].contains("Tech Conference 2024"));
    }

    #[test]
    fn render_mail_ignores_unrelated_key() {
        let params = MailParams::for_record(NotificationAction::Created, &conference());
        let mut message = NotificationMessage::default();

        render_mail("unrelated_key", &mut message, &params);

        assert!(message.is_empty());
    }

    #[test]
    fn action_maps_to_notification_type() {
        assert_eq!(
            NotificationAction::Published.notification_type(),
            NotificationType::Published
        );
        assert_eq!(NotificationAction::Created.to_string(), "created");
    }
}
