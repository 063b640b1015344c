use std::time::Duration;

use anyhow::Context;
use http::StatusCode;
use migration::{Migrator, MigratorTrait};
use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connects the pool, applies pending migrations and stores the connection
/// for the request handlers.
pub async fn init_database_connection() -> anyhow::Result<&'static DatabaseConnection> {
    if let Some(db) = DATABASE_CONNECTION.get() {
        return Ok(db);
    }

    let mut opt = ConnectOptions::new(APP_CONFIG.database_url.clone());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    Ok(DATABASE_CONNECTION.get_or_init(|| db))
}

pub fn get_database_connection() -> Result<&'static DatabaseConnection, (StatusCode, String)> {
    DATABASE_CONNECTION.get().ok_or_else(|| {
        tracing::error!("DATABASE_CONNECTION not set");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database is not available".to_string(),
        )
    })
}
