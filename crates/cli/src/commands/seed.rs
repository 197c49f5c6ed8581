//! Seed the catalog with products from a YAML file.
//!
//! The file is a list of products in the same shape as the create endpoint:
//!
//! ```yaml
//! - nombre: Cuaderno A4
//!   precio: 12.5
//!   stock: 40
//!   categoria: Papeleria
//! - nombre: Lapiz
//! ```
//!
//! Every entry is validated before the database is touched.

use std::path::Path;

use sqlx::SqlitePool;
use tracing::info;

use mercado_core::{NewProduct, ProductDraft, ProductError, ProductId};
use mercado_server::db::{ProductRepository, RepositoryError};
use mercado_server::{ServerConfig, db};

/// Errors from seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Entry {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ProductError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] mercado_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Parse and validate seed content. Entries are numbered from 1 in errors.
///
/// # Errors
///
/// Returns `SeedError::Yaml` for malformed content and `SeedError::Invalid`
/// for the first entry without a name.
pub fn parse(content: &str) -> Result<Vec<ProductDraft>, SeedError> {
    let products: Vec<NewProduct> = serde_yaml::from_str(content)?;
    products
        .into_iter()
        .enumerate()
        .map(|(i, product)| {
            product
                .validate()
                .map_err(|source| SeedError::Invalid { index: i + 1, source })
        })
        .collect()
}

/// Insert validated products, returning their new IDs in file order.
///
/// # Errors
///
/// Returns `SeedError::Repository` on the first failed insert.
pub async fn insert_all(
    pool: &SqlitePool,
    drafts: &[ProductDraft],
) -> Result<Vec<ProductId>, SeedError> {
    let repo = ProductRepository::new(pool);
    let mut ids = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let id = repo.create(draft).await?;
        info!(product_id = %id, nombre = %draft.nombre, "Seeded product");
        ids.push(id);
    }
    Ok(ids)
}

/// Seed products from a YAML file.
///
/// Migrations are applied first so a fresh database can be seeded directly.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an entry is
/// invalid, or database operations fail.
pub async fn products(file_path: &str) -> Result<(), SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::NotFound(file_path.to_string()));
    }

    info!(path = %file_path, "Loading products from file");
    let content = tokio::fs::read_to_string(path).await?;
    let drafts = parse(&content)?;
    info!(products = drafts.len(), "Parsed and validated seed file");

    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;
    info!("Connected to database");

    let ids = insert_all(&pool, &drafts).await?;
    info!("Seeding complete! Products inserted: {}", ids.len());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_parse_applies_defaults() {
        let drafts = parse("- nombre: Lapiz\n- nombre: Cuaderno\n  precio: 12.5\n").unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].nombre, "Lapiz");
        assert!((drafts[0].precio - 0.0).abs() < f64::EPSILON);
        assert!((drafts[1].precio - 12.5).abs() < f64::EPSILON);
        assert_eq!(drafts[1].categoria, "");
    }

    #[test]
    fn test_parse_reports_entry_without_name() {
        let err = parse("- nombre: Lapiz\n- precio: 3\n").unwrap_err();
        assert!(matches!(
            err,
            SeedError::Invalid {
                index: 2,
                source: ProductError::MissingName
            }
        ));
    }

    #[test]
    fn test_parse_rejects_non_list() {
        assert!(matches!(parse("nombre: Lapiz"), Err(SeedError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_insert_all_returns_ids_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let url = SecretString::from(format!("sqlite://{}", dir.path().join("seed.db").display()));
        let pool = db::create_pool(&url).await.unwrap();
        db::migrate(&pool).await.unwrap();

        let drafts = parse("- nombre: A\n- nombre: B\n").unwrap();
        let ids = insert_all(&pool, &drafts).await.unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        let stored = ProductRepository::new(&pool).list_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].nombre, "B");
    }
}
