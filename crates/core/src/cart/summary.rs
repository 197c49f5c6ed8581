//! Pure cart aggregation: quantities per product and priced totals.

use std::collections::BTreeMap;

use crate::types::{Price, PriceError, Product, ProductId};

use super::CartEntry;

/// Count occurrences of each product id, in ascending id order.
#[must_use]
pub fn quantities(entries: &[CartEntry]) -> Vec<(ProductId, u32)> {
    let mut counts: BTreeMap<ProductId, u32> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.id).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// One priced line of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub unit_price: Price,
    pub subtotal: Price,
}

impl CartLine {
    /// Price a resolved product. A missing price counts as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit price or subtotal does not fit a decimal.
    pub fn new(product: Product, quantity: u32) -> Result<Self, PriceError> {
        let unit_price = Price::from_f64(product.precio)?;
        let subtotal = unit_price.checked_mul(quantity)?;
        Ok(Self {
            product,
            quantity,
            unit_price,
            subtotal,
        })
    }
}

/// Priced cart contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl CartSummary {
    /// Build a summary from resolved products and their quantities.
    ///
    /// A line that cannot be priced, or would overflow the total, is logged
    /// and left out.
    pub fn from_resolved(items: impl IntoIterator<Item = (Product, u32)>) -> Self {
        let mut summary = Self::default();
        for (product, quantity) in items {
            let id = product.id;
            let priced = CartLine::new(product, quantity).and_then(|line| {
                let total = summary.total.checked_add(line.subtotal)?;
                Ok((line, total))
            });
            match priced {
                Ok((line, total)) => {
                    summary.lines.push(line);
                    summary.total = total;
                }
                Err(e) => {
                    tracing::warn!(error = %e, product_id = %id, "cart line cannot be priced");
                }
            }
        }
        summary
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, precio: Option<f64>) -> Product {
        Product {
            id: ProductId::new(id),
            nombre: format!("Producto {id}"),
            descripcion: None,
            precio,
            stock: None,
            categoria: None,
            imagen: None,
        }
    }

    fn entry(id: i64) -> CartEntry {
        CartEntry {
            id: ProductId::new(id),
            added_at: 0,
        }
    }

    #[test]
    fn test_quantities_group_and_sort() {
        let entries = [entry(7), entry(2), entry(7), entry(7)];
        assert_eq!(
            quantities(&entries),
            vec![(ProductId::new(2), 1), (ProductId::new(7), 3)]
        );
    }

    #[test]
    fn test_quantities_empty() {
        assert!(quantities(&[]).is_empty());
    }

    #[test]
    fn test_total_sums_subtotals() {
        let summary =
            CartSummary::from_resolved([(product(1, Some(10.50)), 2), (product(2, Some(5.00)), 1)]);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].subtotal.amount(), Decimal::new(2100, 2));
        assert_eq!(summary.total.amount(), Decimal::new(2600, 2));
        assert_eq!(summary.total.display(), "S/ 26.00");
        assert_eq!(summary.item_count(), 3);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let summary = CartSummary::from_resolved([(product(1, None), 4)]);
        assert_eq!(summary.total, Price::ZERO);
    }

    #[test]
    fn test_subtotal_overflow_drops_line() {
        let summary =
            CartSummary::from_resolved([(product(1, Some(5e28)), 2), (product(2, Some(5.00)), 1)]);

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].product.id, ProductId::new(2));
        assert_eq!(summary.total.display(), "S/ 5.00");
    }

    #[test]
    fn test_total_overflow_drops_line() {
        let summary =
            CartSummary::from_resolved([(product(1, Some(5e28)), 1), (product(2, Some(5e28)), 1)]);

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total, summary.lines[0].subtotal);
    }

    #[test]
    fn test_unrepresentable_price_is_not_zero() {
        assert!(CartLine::new(product(1, Some(1e30)), 1).is_err());

        let summary =
            CartSummary::from_resolved([(product(1, Some(1e30)), 1), (product(2, Some(2.50)), 2)]);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total.amount(), Decimal::new(500, 2));
    }
}
