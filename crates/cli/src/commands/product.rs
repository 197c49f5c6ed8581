//! Product administration against the catalog API.

use mercado_core::{NewProduct, ProductId, ProductPatch};
use mercado_storefront::catalog;

/// Product fields accepted on the command line.
#[derive(Debug, Default, clap::Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub nombre: Option<String>,

    /// Description
    #[arg(long)]
    pub descripcion: Option<String>,

    /// Price in soles
    #[arg(long)]
    pub precio: Option<f64>,

    /// Units in stock
    #[arg(long)]
    pub stock: Option<i64>,

    /// Category
    #[arg(long)]
    pub categoria: Option<String>,

    /// Stored image filename (as returned by `mercado upload`)
    #[arg(long)]
    pub imagen: Option<String>,
}

impl From<ProductFields> for NewProduct {
    fn from(fields: ProductFields) -> Self {
        Self {
            nombre: fields.nombre,
            descripcion: fields.descripcion,
            precio: fields.precio,
            stock: fields.stock,
            categoria: fields.categoria,
            imagen: fields.imagen,
        }
    }
}

impl From<ProductFields> for ProductPatch {
    fn from(fields: ProductFields) -> Self {
        Self {
            nombre: fields.nombre.map(Some),
            descripcion: fields.descripcion.map(Some),
            precio: fields.precio.map(Some),
            stock: fields.stock.map(Some),
            categoria: fields.categoria.map(Some),
            imagen: fields.imagen.map(Some),
        }
    }
}

/// Print the rendered detail view for `raw_id`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or rendering fails.
pub async fn show(raw_id: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let html = catalog::load_product_detail(&client, raw_id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{html}");
    }
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns an error if the API rejects the product or is unreachable.
pub async fn create(fields: ProductFields) -> Result<(), Box<dyn std::error::Error>> {
    let created = super::client()?.create(&NewProduct::from(fields)).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{} (id {})", created.message, created.id);
    }
    Ok(())
}

/// Partially update a product.
///
/// # Errors
///
/// Returns an error if no field is given, the product does not exist, or
/// the API is unreachable.
pub async fn update(id: ProductId, fields: ProductFields) -> Result<(), Box<dyn std::error::Error>> {
    let updated = super::client()?
        .update(id, &ProductPatch::from(fields))
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", updated.message);
    }
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the API is unreachable.
pub async fn delete(id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let deleted = super::client()?.delete(id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", deleted.message);
    }
    Ok(())
}
