//! Database operations for the catalog `SQLite` file.
//!
//! ## Tables
//!
//! - `productos` - Product catalog (single table, no relations)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and embedded in the
//! binary. The server applies them on startup; they can also be run via:
//! ```bash
//! cargo run -p mercado-cli -- migrate
//! ```

pub mod products;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use mercado_core::ProductError;

pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Input rejected before reaching the database.
    #[error(transparent)]
    Invalid(#[from] ProductError),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create an `SQLite` connection pool, creating the database file if missing.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the file cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options =
        SqliteConnectOptions::from_str(database_url.expose_secret())?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
