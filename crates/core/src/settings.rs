//! Notification settings: keys, defaults, and recipient resolution.
//!
//! Settings live under the [`CONFIG_NAME`] configuration object as three
//! keys. A store that has never been saved yields
//! [`NotificationSettings::default`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the configuration object holding the notifier settings.
pub const CONFIG_NAME: &str = "event_notifier.settings";

/// Key for the recipient address.
pub const KEY_NOTIFICATION_EMAIL: &str = "notification_email";

/// Key for the global on/off switch.
pub const KEY_ENABLE_NOTIFICATIONS: &str = "enable_notifications";

/// Key for the list of enabled notification types.
pub const KEY_NOTIFICATION_TYPES: &str = "notification_types";

/// Recipient used when no address is configured.
pub const FALLBACK_RECIPIENT: &str = "admin@example.com";

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Lifecycle situations an administrator can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Created,
    Published,
    Updated,
}

impl NotificationType {
    /// Every recognized type, in form display order.
    pub const ALL: [NotificationType; 3] = [Self::Created, Self::Published, Self::Updated];

    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Published => "published",
            Self::Updated => "updated",
        }
    }

    /// Human-readable label shown on the settings form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "Event Created",
            Self::Published => "Event Published",
            Self::Updated => "Event Updated",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "created" => Ok(Self::Created),
            "published" => Ok(Self::Published),
            "updated" => Ok(Self::Updated),
            _ => Err(CoreError::Validation(format!(
                "Invalid notification type: '{s}'. Must be one of: created, published, updated"
            ))),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types enabled when nothing has been configured yet.
pub fn default_notification_types() -> BTreeSet<NotificationType> {
    BTreeSet::from([NotificationType::Created, NotificationType::Published])
}

// ---------------------------------------------------------------------------
// NotificationSettings
// ---------------------------------------------------------------------------

/// The notifier's persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Recipient address. Empty means "use [`FALLBACK_RECIPIENT`]".
    #[serde(default)]
    pub notification_email: String,

    /// Global switch for all notifications.
    #[serde(default = "default_enabled")]
    pub enable_notifications: bool,

    /// Which lifecycle situations trigger a notification.
    #[serde(default = "default_notification_types")]
    pub notification_types: BTreeSet<NotificationType>,
}

fn default_enabled() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            notification_email: String::new(),
            enable_notifications: default_enabled(),
            notification_types: default_notification_types(),
        }
    }
}

impl NotificationSettings {
    /// The address a notification goes to; never empty.
    pub fn recipient(&self) -> &str {
        let configured = self.notification_email.trim();
        if configured.is_empty() {
            FALLBACK_RECIPIENT
        } else {
            configured
        }
    }

    /// Whether notifications of `kind` should be sent at all.
    pub fn is_enabled_for(&self, kind: NotificationType) -> bool {
        self.enable_notifications && self.notification_types.contains(&kind)
    }

    /// Flatten into `(key, value)` pairs for key-value stores.
    pub fn to_config_values(&self) -> Vec<(&'static str, serde_json::Value)> {
        let types: Vec<&str> = self.notification_types.iter().map(|t| t.as_str()).collect();
        vec![
            (
                KEY_NOTIFICATION_EMAIL,
                serde_json::Value::String(self.notification_email.clone()),
            ),
            (
                KEY_ENABLE_NOTIFICATIONS,
                serde_json::Value::Bool(self.enable_notifications),
            ),
            (KEY_NOTIFICATION_TYPES, serde_json::json!(types)),
        ]
    }

    /// Rebuild settings from `(key, value)` pairs.
    ///
    /// Keys that are absent keep their defaults; unknown keys are ignored.
    /// A value of the wrong JSON type is a validation error.
    pub fn from_config_values<'a, I>(values: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a serde_json::Value)>,
    {
        let mut settings = Self::default();

        for (key, value) in values {
            match key {
                KEY_NOTIFICATION_EMAIL => {
                    settings.notification_email = match value {
                        serde_json::Value::Null => String::new(),
                        serde_json::Value::String(s) => s.clone(),
                        other => return Err(wrong_type(key, "a string", other)),
                    };
                }
                KEY_ENABLE_NOTIFICATIONS => {
                    settings.enable_notifications = value
                        .as_bool()
                        .ok_or_else(|| wrong_type(key, "a boolean", value))?;
                }
                KEY_NOTIFICATION_TYPES => {
                    let items = value
                        .as_array()
                        .ok_or_else(|| wrong_type(key, "an array", value))?;
                    settings.notification_types = items
                        .iter()
                        .map(|item| {
                            item.as_str()
                                .ok_or_else(|| wrong_type(key, "an array of strings", value))
                                .and_then(NotificationType::from_str)
                        })
                        .collect::<Result<_, _>>()?;
                }
                _ => {}
            }
        }

        Ok(settings)
    }
}

fn wrong_type(key: &str, expected: &str, got: &serde_json::Value) -> CoreError {
    CoreError::Validation(format!("Config key '{key}' must be {expected}, got {got}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
