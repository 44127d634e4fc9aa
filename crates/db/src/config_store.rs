//! [`ConfigStore`] backed by Postgres.

use async_trait::async_trait;
use event_notifier_core::{ConfigStore, CoreError, NotificationSettings};

use crate::models::setting::SettingRow;
use crate::repositories::SettingRepo;
use crate::DbPool;

/// Reads and writes notifier settings through [`SettingRepo`].
#[derive(Clone)]
pub struct PgConfigStore {
    pool: DbPool,
}

impl PgConfigStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild settings from stored rows; absent keys keep their defaults.
pub fn settings_from_rows(rows: &[SettingRow]) -> Result<NotificationSettings, CoreError> {
    NotificationSettings::from_config_values(rows.iter().map(|r| (r.name.as_str(), &r.value)))
}

fn internal(e: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("settings storage: {e}"))
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn load(&self) -> Result<NotificationSettings, CoreError> {
        let rows = SettingRepo::list_all(&self.pool).await.map_err(internal)?;
        settings_from_rows(&rows)
    }

    async fn save(&self, settings: &NotificationSettings) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;
        for (name, value) in settings.to_config_values() {
            SettingRepo::upsert(&mut *tx, name, &value)
                .await
                .map_err(internal)?;
        }
        tx.commit().await.map_err(internal)?;

        tracing::info!(
            recipient = %settings.recipient(),
            enabled = settings.enable_notifications,
            "Notifier settings saved"
        );
        Ok(())
    }
}
