//! The configuration store port.
//!
//! [`ConfigStore`] is the notifier's only view of persisted settings. The
//! dispatcher reads through it on every lifecycle event and the settings form
//! writes through it. [`InMemoryConfigStore`] backs tests and deployments
//! without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::settings::NotificationSettings;

/// Load and persist [`NotificationSettings`].
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the current settings.
    ///
    /// A store that has never been written returns
    /// [`NotificationSettings::default`].
    async fn load(&self) -> Result<NotificationSettings, CoreError>;

    /// Persist all settings keys at once.
    async fn save(&self, settings: &NotificationSettings) -> Result<(), CoreError>;
}

/// Process-local settings store.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    settings: RwLock<Option<NotificationSettings>>,
}

impl InMemoryConfigStore {
    /// Create an empty store; `load` yields defaults until the first save.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `settings`.
    pub fn with_settings(settings: NotificationSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }

    /// Whether anything has been saved yet.
    pub async fn is_saved(&self) -> bool {
        self.settings.read().await.is_some()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load(&self) -> Result<NotificationSettings, CoreError> {
        Ok(self.settings.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, settings: &NotificationSettings) -> Result<(), CoreError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
