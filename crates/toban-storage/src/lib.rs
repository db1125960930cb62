pub mod error;
mod models;
pub mod repository;

pub use error::{Result, StorageError};
pub use repository::SqliteScheduleRepository;

use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;

/// Initialize the duty database with migrations
pub async fn init_duty_db(db_path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_path)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    // Run migrations (from migrations/ directory at crate root)
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("duty DB initialized");

    Ok(pool)
}

/// Check if a specific table exists
pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let row = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
        .bind(table_name)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
