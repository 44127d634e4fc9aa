//! Admin settings form: schema, validation, submit.
//!
//! The form has exactly three fields, one per settings key. [`build`]
//! describes them with current values filled in; a [`SettingsSubmission`]
//! comes back from the admin, is checked with `validator`, and [`submit`]
//! writes all keys through the [`ConfigStore`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::config_store::ConfigStore;
use crate::error::CoreError;
use crate::settings::{
    NotificationSettings, NotificationType, CONFIG_NAME, KEY_ENABLE_NOTIFICATIONS,
    KEY_NOTIFICATION_EMAIL, KEY_NOTIFICATION_TYPES,
};

/// Stable identifier of the settings form.
pub const FORM_ID: &str = "event_notifier_settings";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// One selectable option of a checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Widget type of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Checkbox,
    Checkboxes { options: Vec<FieldOption> },
}

/// A single form field with its current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub default_value: serde_json::Value,
}

/// The full settings form as presented to the admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsFormDefinition {
    pub form_id: &'static str,
    pub config_name: &'static str,
    pub fields: Vec<FormField>,
}

impl SettingsFormDefinition {
    /// Look up a field by its key.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Describe the settings form, populated from `settings`.
pub fn build(settings: &NotificationSettings) -> SettingsFormDefinition {
    let selected: Vec<&str> = settings
        .notification_types
        .iter()
        .map(|t| t.as_str())
        .collect();

    SettingsFormDefinition {
        form_id: FORM_ID,
        config_name: CONFIG_NAME,
        fields: vec![
            FormField {
                name: KEY_NOTIFICATION_EMAIL,
                title: "Notification Email",
                description: "Email address to receive event notifications.",
                required: true,
                kind: FieldKind::Email,
                default_value: serde_json::json!(settings.notification_email),
            },
            FormField {
                name: KEY_ENABLE_NOTIFICATIONS,
                title: "Enable Email Notifications",
                description: "Send email notifications when events are created or published.",
                required: false,
                kind: FieldKind::Checkbox,
                default_value: serde_json::json!(settings.enable_notifications),
            },
            FormField {
                name: KEY_NOTIFICATION_TYPES,
                title: "Notification Types",
                description: "Select which events should trigger notifications.",
                required: false,
                kind: FieldKind::Checkboxes {
                    options: NotificationType::ALL
                        .iter()
                        .map(|t| FieldOption {
                            value: t.as_str(),
                            label: t.label(),
                        })
                        .collect(),
                },
                default_value: serde_json::json!(selected),
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Values posted back from the settings form.
///
/// Unchecked checkboxes are simply absent, hence the `false` / empty
/// defaults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsSubmission {
    #[validate(
        length(min = 1, message = "Notification email is required"),
        email(message = "Notification email must be a valid email address")
    )]
    pub notification_email: String,

    #[serde(default)]
    pub enable_notifications: bool,

    #[serde(default)]
    pub notification_types: Vec<String>,
}

impl SettingsSubmission {
    /// Validate the submission and convert it into settings.
    pub fn into_settings(self) -> Result<NotificationSettings, CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        let notification_types = self
            .notification_types
            .iter()
            .map(|t| NotificationType::from_str(t))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(NotificationSettings {
            notification_email: self.notification_email,
            enable_notifications: self.enable_notifications,
            notification_types,
        })
    }
}

/// Flatten `validator` errors into one message, fields in name order.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate `submission` and persist every settings key.
///
/// Returns the settings as stored.
pub async fn submit(
    store: &dyn ConfigStore,
    submission: SettingsSubmission,
) -> Result<NotificationSettings, CoreError> {
    let settings = submission.into_settings()?;
    store.save(&settings).await?;
    Ok(settings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
