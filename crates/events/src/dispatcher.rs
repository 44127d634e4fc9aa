//! Lifecycle-event to notification dispatch.
//!
//! [`NotificationDispatcher`] is invoked inline by the host for every content
//! save. It decides whether the save warrants an email, resolves the
//! recipient, and makes at most one gateway call. Nothing it does can fail
//! the host's save: skips are silent, delivery failures are logged, and the
//! decision is returned as a [`DispatchOutcome`] for callers that care.

use std::sync::Arc;

use event_notifier_core::message::{MailParams, NotificationAction, MAIL_KEY_EVENT_NOTIFICATION};
use event_notifier_core::{ConfigStore, EventRecord, NotificationSettings};
use serde::Serialize;

use crate::gateway::MailGateway;

/// Language code used for outgoing mail unless overridden.
pub const DEFAULT_LANGCODE: &str = "en";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why a lifecycle event did not produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The host passed no record.
    MissingRecord,
    /// The record is not of the `event` content type.
    NotAnEvent,
    /// A newly created record is not published.
    Unpublished,
    /// An update did not move the record from unpublished to published.
    NoPublishTransition,
    /// `enable_notifications` is off.
    NotificationsDisabled,
    /// The action is not selected in `notification_types`.
    ActionNotSelected,
}

/// Result of handling one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Skipped { reason: SkipReason },
    Sent { recipient: String },
    Failed { recipient: String },
}

impl DispatchOutcome {
    fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    /// Whether a gateway call was made.
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Reacts to content lifecycle events with notification emails.
pub struct NotificationDispatcher {
    config_store: Arc<dyn ConfigStore>,
    mail_gateway: Arc<dyn MailGateway>,
    langcode: String,
}

impl NotificationDispatcher {
    /// Create a dispatcher sending through `mail_gateway`, configured by
    /// `config_store`.
    pub fn new(config_store: Arc<dyn ConfigStore>, mail_gateway: Arc<dyn MailGateway>) -> Self {
        Self {
            config_store,
            mail_gateway,
            langcode: DEFAULT_LANGCODE.to_string(),
        }
    }

    /// Override the language code passed to the gateway.
    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = langcode.into();
        self
    }

    /// Handle "entity created".
    ///
    /// Notifies only for published `event` records.
    pub async fn on_created(&self, record: Option<&EventRecord>) -> DispatchOutcome {
        let Some(record) = record else {
            return DispatchOutcome::skipped(SkipReason::MissingRecord);
        };
        if !record.is_event() {
            return DispatchOutcome::skipped(SkipReason::NotAnEvent);
        }
        if !record.is_published {
            tracing::debug!(title = %record.title, "Event created unpublished, not notifying");
            return DispatchOutcome::skipped(SkipReason::Unpublished);
        }

        self.notify(NotificationAction::Created, record).await
    }

    /// Handle "entity updated".
    ///
    /// Notifies only when the previous snapshot was unpublished and the
    /// current one is published. Ordinary edits never notify.
    pub async fn on_updated(&self, record: &EventRecord) -> DispatchOutcome {
        if !record.is_event() {
            return DispatchOutcome::skipped(SkipReason::NotAnEvent);
        }
        if !record.is_publish_transition() {
            return DispatchOutcome::skipped(SkipReason::NoPublishTransition);
        }

        self.notify(NotificationAction::Published, record).await
    }

    async fn notify(&self, action: NotificationAction, record: &EventRecord) -> DispatchOutcome {
        let settings = self.load_settings().await;

        if !settings.enable_notifications {
            tracing::debug!(title = %record.title, %action, "Notifications disabled");
            return DispatchOutcome::skipped(SkipReason::NotificationsDisabled);
        }
        if !settings.is_enabled_for(action.notification_type()) {
            tracing::debug!(title = %record.title, %action, "Notification type not selected");
            return DispatchOutcome::skipped(SkipReason::ActionNotSelected);
        }

        let recipient = settings.recipient().to_string();
        let params = MailParams::for_record(action, record);

        match self
            .mail_gateway
            .send(MAIL_KEY_EVENT_NOTIFICATION, &recipient, &self.langcode, &params)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    recipient = %recipient,
                    "Event notification sent for {} ({})",
                    record.title,
                    action
                );
                DispatchOutcome::Sent { recipient }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    recipient = %recipient,
                    "Failed to send event notification for {}",
                    record.title
                );
                DispatchOutcome::Failed { recipient }
            }
        }
    }

    /// Read settings fresh for this event, falling back to defaults.
    async fn load_settings(&self) -> NotificationSettings {
        match self.config_store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notifier settings, using defaults");
                NotificationSettings::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
