//! Cart resolution and rendering.
//!
//! Products are resolved one ID at a time, in ascending ID order. A product
//! that fails to load or no longer exists is logged and left out; the rest
//! of the cart still renders and the total covers only what resolved.

use askama::Template;
use tracing::instrument;

use mercado_core::cart::{CartLine, CartSummary};
use mercado_core::{Cart, CartStorage, ProductId, listing_image_url};

use crate::api::ProductSource;
use crate::error::StorefrontError;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub nombre: String,
    pub categoria: String,
    pub imagen_url: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id,
            nombre: line.product.nombre.clone(),
            categoria: line.product.categoria.clone().unwrap_or_default(),
            imagen_url: listing_image_url(line.product.imagen.as_deref()),
            quantity: line.quantity,
            unit_price: line.unit_price.display(),
            subtotal: line.subtotal.display(),
        }
    }
}

/// Cart list template.
#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub empty: bool,
    pub lines: Vec<CartItemView>,
    pub total: String,
}

/// Resolve each `(id, quantity)` pair through `source` and price the result.
///
/// One request per ID, awaited in sequence.
#[instrument(skip_all, fields(distinct = quantities.len()))]
pub async fn resolve<P: ProductSource>(
    source: &P,
    quantities: &[(ProductId, u32)],
) -> CartSummary {
    let mut resolved = Vec::with_capacity(quantities.len());

    for &(id, quantity) in quantities {
        match source.fetch_product(id).await {
            Ok(Some(item)) => resolved.push((item.product, quantity)),
            Ok(None) => {
                tracing::warn!(product_id = %id, "cart product no longer exists");
            }
            Err(e) => {
                tracing::error!(error = %e, product_id = %id, "failed to fetch cart product");
            }
        }
    }

    CartSummary::from_resolved(resolved)
}

/// Render a priced summary. `empty` selects the empty-cart message.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_summary(summary: &CartSummary, empty: bool) -> askama::Result<String> {
    CartTemplate {
        empty,
        lines: summary.lines.iter().map(CartItemView::from).collect(),
        total: summary.total.display(),
    }
    .render()
}

/// Resolve and render the current cart.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub async fn render_cart<S, P>(cart: &Cart<S>, source: &P) -> Result<String, StorefrontError>
where
    S: CartStorage,
    P: ProductSource,
{
    let entries = cart.entries();
    if entries.is_empty() {
        return Ok(render_summary(&CartSummary::default(), true)?);
    }

    let summary = resolve(source, &mercado_core::cart::quantities(&entries)).await;
    Ok(render_summary(&summary, false)?)
}

/// Simulated checkout: empty the cart and render it again.
///
/// # Errors
///
/// Returns an error if the cart cannot be cleared or the template fails.
pub async fn checkout<S, P>(cart: &mut Cart<S>, source: &P) -> Result<String, StorefrontError>
where
    S: CartStorage,
    P: ProductSource,
{
    let count = cart.count();
    cart.clear()?;
    tracing::info!(entries = count, "simulated checkout completed");
    render_cart(cart, source).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use mercado_core::{CatalogProduct, MemoryStorage, Product};

    use super::*;
    use crate::api::ClientError;

    /// In-memory product source. IDs listed in `broken` fail with a 500.
    struct FakeSource {
        products: HashMap<ProductId, CatalogProduct>,
        broken: Vec<ProductId>,
    }

    impl FakeSource {
        fn new(products: &[(i64, &str, Option<f64>)]) -> Self {
            let products = products
                .iter()
                .map(|&(id, nombre, precio)| {
                    let product = Product {
                        id: ProductId::new(id),
                        nombre: nombre.to_string(),
                        descripcion: None,
                        precio,
                        stock: Some(10),
                        categoria: Some("Utiles".to_string()),
                        imagen: None,
                    };
                    (ProductId::new(id), CatalogProduct::for_detail(product))
                })
                .collect();
            Self {
                products,
                broken: Vec::new(),
            }
        }
    }

    impl ProductSource for FakeSource {
        async fn list_products(&self) -> Result<Vec<CatalogProduct>, ClientError> {
            Ok(self.products.values().cloned().collect())
        }

        async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ClientError> {
            if self.broken.contains(&id) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            Ok(self.products.get(&id).cloned())
        }
    }

    fn cart_with(ids: &[i64]) -> Cart<MemoryStorage> {
        let mut cart = Cart::new(MemoryStorage::new());
        for &id in ids {
            cart.add(ProductId::new(id)).unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn test_empty_cart_message() {
        let source = FakeSource::new(&[]);
        let html = render_cart(&cart_with(&[]), &source).await.unwrap();
        assert!(html.contains("El carrito está vacío."));
        assert!(!html.contains("Total:"));
    }

    #[tokio::test]
    async fn test_totals_use_decimal_arithmetic() {
        let source = FakeSource::new(&[(1, "Cuaderno", Some(10.50)), (2, "Regla", Some(5.00))]);
        let cart = cart_with(&[1, 1, 2]);

        let summary = resolve(&source, &cart.quantities()).await;
        assert_eq!(summary.total.display(), "S/ 26.00");

        let html = render_cart(&cart, &source).await.unwrap();
        assert!(html.contains("S/ 10.50 x 2 = S/ 21.00"));
        assert!(html.contains("S/ 5.00 x 1 = S/ 5.00"));
        assert!(html.contains("Total: S/ 26.00"));
        assert!(html.find("Cuaderno").unwrap() < html.find("Regla").unwrap());
    }

    #[tokio::test]
    async fn test_unresolvable_ids_are_skipped() {
        let mut source = FakeSource::new(&[(1, "Cuaderno", Some(10.50)), (3, "Goma", Some(1.00))]);
        source.broken.push(ProductId::new(3));
        // 2 does not exist, 3 fails to fetch
        let cart = cart_with(&[1, 2, 3, 1]);

        let html = render_cart(&cart, &source).await.unwrap();
        assert!(html.contains("Cuaderno"));
        assert!(!html.contains("Goma"));
        assert!(html.contains("Total: S/ 21.00"));
        assert!(!html.contains("El carrito está vacío."));
    }

    #[tokio::test]
    async fn test_missing_price_counts_as_zero() {
        let source = FakeSource::new(&[(1, "Regalo", None)]);
        let html = render_cart(&cart_with(&[1, 1]), &source).await.unwrap();
        assert!(html.contains("S/ 0.00 x 2 = S/ 0.00"));
        assert!(html.contains("Total: S/ 0.00"));
    }

    #[tokio::test]
    async fn test_oversized_prices_are_skipped_not_fatal() {
        let source = FakeSource::new(&[
            (1, "Lingote", Some(5e28)),
            (2, "Joya", Some(1e30)),
            (3, "Regla", Some(5.00)),
        ]);
        let html = render_cart(&cart_with(&[1, 1, 2, 3]), &source).await.unwrap();

        assert!(!html.contains("Lingote"));
        assert!(!html.contains("Joya"));
        assert!(html.contains("Regla"));
        assert!(html.contains("Total: S/ 5.00"));
    }

    #[tokio::test]
    async fn test_checkout_clears_and_renders_empty() {
        let source = FakeSource::new(&[(1, "Cuaderno", Some(10.50))]);
        let mut cart = cart_with(&[1, 1]);

        let html = checkout(&mut cart, &source).await.unwrap();
        assert!(html.contains("El carrito está vacío."));
        assert_eq!(cart.count(), 0);
    }

    #[tokio::test]
    async fn test_remove_rerenders_without_product() {
        let source = FakeSource::new(&[(1, "Cuaderno", Some(10.50)), (2, "Regla", Some(5.00))]);
        let mut cart = cart_with(&[1, 2, 2]);

        cart.remove(ProductId::new(2)).unwrap();
        let html = render_cart(&cart, &source).await.unwrap();
        assert!(!html.contains("Regla"));
        assert!(html.contains("Total: S/ 10.50"));
    }
}
