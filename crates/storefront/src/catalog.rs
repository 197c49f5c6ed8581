//! Catalog grid and product detail rendering.

use askama::Template;
use tracing::instrument;

use mercado_core::{CatalogProduct, PLACEHOLDER_IMAGE, Price, ProductId};

use crate::api::ProductSource;

/// Shown when the detail view is opened without a product ID.
pub const NOT_SPECIFIED_MESSAGE: &str = "Producto no especificado.";

/// Shown when the requested product does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Producto no encontrado.";

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub nombre: String,
    pub categoria: String,
    pub precio: String,
    pub imagen_url: String,
}

impl From<&CatalogProduct> for ProductCardView {
    fn from(item: &CatalogProduct) -> Self {
        let product = &item.product;
        Self {
            id: product.id,
            nombre: product.nombre.clone(),
            categoria: product.categoria.clone().unwrap_or_default(),
            precio: Price::display_f64(product.precio),
            imagen_url: image_or_placeholder(item),
        }
    }
}

/// Product detail display data for templates.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub nombre: String,
    pub categoria: String,
    pub descripcion: String,
    pub precio: String,
    pub stock: String,
    pub imagen_url: String,
}

impl From<&CatalogProduct> for ProductDetailView {
    fn from(item: &CatalogProduct) -> Self {
        let product = &item.product;
        Self {
            id: product.id,
            nombre: product.nombre.clone(),
            categoria: product.categoria.clone().unwrap_or_default(),
            descripcion: product.descripcion.clone().unwrap_or_default(),
            precio: Price::display_f64(product.precio),
            stock: product
                .stock
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
            imagen_url: image_or_placeholder(item),
        }
    }
}

fn image_or_placeholder(item: &CatalogProduct) -> String {
    item.imagen_url
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

/// Catalog grid template.
#[derive(Template)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub cards: Vec<ProductCardView>,
}

/// Product detail template.
#[derive(Template)]
#[template(path = "product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: Option<ProductDetailView>,
    pub message: &'static str,
}

/// Render the catalog grid.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_catalog(products: &[CatalogProduct]) -> askama::Result<String> {
    CatalogTemplate {
        cards: products.iter().map(ProductCardView::from).collect(),
    }
    .render()
}

/// Render the detail view for a lookup result.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_product_detail(product: Option<&CatalogProduct>) -> askama::Result<String> {
    ProductDetailTemplate {
        product: product.map(ProductDetailView::from),
        message: NOT_FOUND_MESSAGE,
    }
    .render()
}

/// Fetch the catalog and render it. A failed fetch is logged and renders an
/// empty grid.
///
/// # Errors
///
/// Returns an error only if the template fails to render.
#[instrument(skip(source))]
pub async fn load_catalog<P: ProductSource>(source: &P) -> askama::Result<String> {
    let products = match source.list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "failed to load catalog");
            Vec::new()
        }
    };
    render_catalog(&products)
}

/// Resolve the `id` query parameter of the detail page and render it.
///
/// A missing parameter renders [`NOT_SPECIFIED_MESSAGE`]. An unparsable ID,
/// a missing product or a failed fetch render [`NOT_FOUND_MESSAGE`].
///
/// # Errors
///
/// Returns an error only if the template fails to render.
#[instrument(skip(source))]
pub async fn load_product_detail<P: ProductSource>(
    source: &P,
    raw_id: Option<&str>,
) -> askama::Result<String> {
    let Some(raw_id) = raw_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return ProductDetailTemplate {
            product: None,
            message: NOT_SPECIFIED_MESSAGE,
        }
        .render();
    };

    let Ok(id) = raw_id.parse::<ProductId>() else {
        tracing::warn!(raw_id, "invalid product id");
        return render_product_detail(None);
    };

    let product = source.fetch_product(id).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, product_id = %id, "failed to load product detail");
        None
    });
    render_product_detail(product.as_ref())
}
