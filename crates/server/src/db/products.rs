//! Product repository for database operations.
//!
//! Every statement binds its values. Partial updates are compiled from a
//! [`ProductPatch`] field diff; only column names from the closed
//! [`mercado_core::ProductField`] enum are ever written into query text.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use mercado_core::{FieldValue, Product, ProductDraft, ProductId, ProductPatch};

use super::RepositoryError;

/// Raw row of the `productos` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    nombre: String,
    descripcion: Option<String>,
    precio: Option<f64>,
    stock: Option<i64>,
    categoria: Option<String>,
    imagen: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: ProductId::new(r.id),
            nombre: r.nombre,
            descripcion: r.descripcion,
            precio: r.precio,
            stock: r.stock,
            categoria: r.categoria,
            imagen: r.imagen,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, nombre, descripcion, precio, stock, categoria, imagen
            FROM productos
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, nombre, descripcion, precio, stock, categoria, imagen
            FROM productos
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Insert a validated product and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &ProductDraft) -> Result<ProductId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO productos (nombre, descripcion, precio, stock, categoria, imagen)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&draft.nombre)
        .bind(&draft.descripcion)
        .bind(draft.precio)
        .bind(draft.stock)
        .bind(&draft.categoria)
        .bind(&draft.imagen)
        .execute(self.pool)
        .await?;

        let id = ProductId::new(result.last_insert_rowid());
        tracing::info!(product_id = %id, nombre = %draft.nombre, "product created");
        Ok(id)
    }

    /// Apply a partial update, touching only the fields present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the patch has no fields.
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<(), RepositoryError> {
        let changes = patch.validate()?;

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE productos SET ");
        let mut assignments = builder.separated(", ");
        for change in changes {
            assignments.push(format!("{} = ", change.field.column()));
            match change.value {
                FieldValue::Text(value) => assignments.push_bind_unseparated(value),
                FieldValue::Real(value) => assignments.push_bind_unseparated(value),
                FieldValue::Integer(value) => assignments.push_bind_unseparated(value),
            };
        }
        builder.push(" WHERE id = ").push_bind(id.as_i64());

        let result = builder.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = %id, "product updated");
        Ok(())
    }

    /// Permanently delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM productos WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db::{create_pool, migrate};

    async fn pool(dir: &tempfile::TempDir) -> SqlitePool {
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        let pool = create_pool(&SecretString::from(url)).await.unwrap();
        migrate(&pool).await.unwrap();
        pool
    }

    fn draft(nombre: &str, precio: f64) -> ProductDraft {
        ProductDraft {
            nombre: nombre.to_string(),
            descripcion: String::new(),
            precio,
            stock: 0,
            categoria: String::new(),
            imagen: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Lapiz", 1.5)).await.unwrap();
        let product = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(product.nombre, "Lapiz");
        assert_eq!(product.precio, Some(1.5));
        assert_eq!(product.stock, Some(0));
        assert_eq!(product.categoria.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let a = repo.create(&draft("A", 1.0)).await.unwrap();
        let b = repo.create(&draft("B", 2.0)).await.unwrap();

        let ids: Vec<ProductId> = repo.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_touches_only_present_fields() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Cuaderno", 4.0)).await.unwrap();
        let patch = ProductPatch {
            stock: Some(Some(12)),
            descripcion: Some(None),
            ..ProductPatch::default()
        };
        repo.update(id, &patch).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.nombre, "Cuaderno");
        assert_eq!(product.precio, Some(4.0));
        assert_eq!(product.stock, Some(12));
        assert_eq!(product.descripcion, None);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let result = repo.update(ProductId::new(1), &ProductPatch::default()).await;
        assert!(matches!(result, Err(RepositoryError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let patch = ProductPatch {
            nombre: Some(Some("X".to_string())),
            ..ProductPatch::default()
        };
        let result = repo.update(ProductId::new(999), &patch).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_value_is_bound_not_interpolated() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Seguro", 1.0)).await.unwrap();
        let hostile = "x'; DROP TABLE productos; --".to_string();
        let patch = ProductPatch {
            nombre: Some(Some(hostile.clone())),
            ..ProductPatch::default()
        };
        repo.update(id, &patch).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.nombre, hostile);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let dir = tempfile::tempdir().unwrap();
        let pool = pool(&dir).await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Borrar", 1.0)).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(matches!(
            repo.delete(id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
