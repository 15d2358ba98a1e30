//! Database migration command.
//!
//! Migrations live in `crates/app/migrations/` and are embedded into this
//! binary at compile time. They are never run automatically by the server;
//! this command is the only path that applies them.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run app database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if `DATABASE_URL` is unset, the database is
/// unreachable, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../app/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
