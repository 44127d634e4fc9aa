//! Setting row model.

use event_notifier_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_notifier_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SettingRow {
    pub name: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
