pub mod assignment;
pub mod models;
pub mod password;
pub mod test_utils;

use migration::Migrator;
use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use util::config;

/// Connects to the configured database and brings the schema up to date.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    connect_to(&config::database_path()).await
}

/// Connects to `path_or_url` and runs every pending migration.
pub async fn connect_to(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = if path_or_url.starts_with("sqlite:") {
        path_or_url.to_owned()
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path_or_url).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbErr::Custom(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let db = Database::connect(&url).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("Connected to database at {url}");
    Ok(db)
}

/// Whether `err` is the database rejecting a duplicate on a unique column.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
