//! Postgres persistence for the event notifier.
//!
//! Settings are stored one row per key in `event_notifier_settings`.
//! [`PgConfigStore`] adapts the repository to the
//! [`ConfigStore`](event_notifier_core::ConfigStore) port.

use sqlx::postgres::PgPoolOptions;

pub mod config_store;
pub mod models;
pub mod repositories;

pub use config_store::PgConfigStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
