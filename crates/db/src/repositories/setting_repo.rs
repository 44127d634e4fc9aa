//! Repository for the `event_notifier_settings` table.

use sqlx::{PgConnection, PgPool};

use crate::models::setting::SettingRow;

/// Column list for `event_notifier_settings` queries.
const COLUMNS: &str = "name, value, created_at, updated_at";

/// Provides read and upsert operations for settings rows.
pub struct SettingRepo;

impl SettingRepo {
    /// List every stored setting, ordered by key.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SettingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_notifier_settings ORDER BY name");
        sqlx::query_as::<_, SettingRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Get a single setting by key.
    pub async fn find(pool: &PgPool, name: &str) -> Result<Option<SettingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_notifier_settings WHERE name = $1");
        sqlx::query_as::<_, SettingRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a setting.
    ///
    /// Takes a connection so callers can group several keys in one
    /// transaction.
    pub async fn upsert(
        conn: &mut PgConnection,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<SettingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_notifier_settings (name, value) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET \
                value = EXCLUDED.value, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SettingRow>(&query)
            .bind(name)
            .bind(value)
            .fetch_one(conn)
            .await
    }
}
