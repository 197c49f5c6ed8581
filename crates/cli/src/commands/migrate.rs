//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mercado migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MERCADO_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://catalogo.db`)
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! server crate. The server also applies them on startup.

use mercado_server::{ServerConfig, db};

/// Errors from running migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] mercado_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running catalog migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
