//! Product records, creation input and partial-update field diffs.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::image::{detail_image_url, listing_image_url};

/// Validation errors for product input.
///
/// The messages are part of the HTTP contract and are returned verbatim in
/// `{"error": ...}` bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    /// `nombre` was absent, null or empty on creation.
    #[error("El campo 'nombre' es requerido.")]
    MissingName,
    /// An update carried no recognised fields.
    #[error("Nada para actualizar.")]
    EmptyPatch,
}

/// A product as stored in the `productos` table.
///
/// Every column except `id` and `nombre` is nullable because a partial
/// update may explicitly write `null` into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
    pub categoria: Option<String>,
    pub imagen: Option<String>,
}

/// A product shaped for API responses, with the derived `imagen_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub imagen_url: Option<String>,
}

impl CatalogProduct {
    /// Shape a product for the listing endpoint (placeholder fallback).
    #[must_use]
    pub fn for_listing(product: Product) -> Self {
        let imagen_url = Some(listing_image_url(product.imagen.as_deref()));
        Self {
            product,
            imagen_url,
        }
    }

    /// Shape a product for the detail endpoint (`null` fallback).
    #[must_use]
    pub fn for_detail(product: Product) -> Self {
        let imagen_url = detail_image_url(product.imagen.as_deref());
        Self {
            product,
            imagen_url,
        }
    }
}

/// Request body for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
}

/// A validated product ready to insert, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub stock: i64,
    pub categoria: String,
    pub imagen: String,
}

impl NewProduct {
    /// Check required fields and fill in defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::MissingName`] if `nombre` is absent or empty.
    pub fn validate(self) -> Result<ProductDraft, ProductError> {
        let nombre = self
            .nombre
            .filter(|n| !n.is_empty())
            .ok_or(ProductError::MissingName)?;

        Ok(ProductDraft {
            nombre,
            descripcion: self.descripcion.unwrap_or_default(),
            precio: self.precio.unwrap_or(0.0),
            stock: self.stock.unwrap_or(0),
            categoria: self.categoria.unwrap_or_default(),
            imagen: self.imagen.unwrap_or_default(),
        })
    }
}

/// Columns that a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Nombre,
    Descripcion,
    Precio,
    Stock,
    Categoria,
    Imagen,
}

impl ProductField {
    /// The column name in the `productos` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Nombre => "nombre",
            Self::Descripcion => "descripcion",
            Self::Precio => "precio",
            Self::Stock => "stock",
            Self::Categoria => "categoria",
            Self::Imagen => "imagen",
        }
    }
}

/// New value for a single column. `None` writes SQL `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Real(Option<f64>),
    Integer(Option<i64>),
}

/// One entry of a field diff.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: ProductField,
    pub value: FieldValue,
}

/// Request body for a partial update.
///
/// Each field distinguishes "absent" (`None`, left untouched) from "present"
/// (`Some(value)`, where `value` may itself be `None` for an explicit `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub precio: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub stock: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub imagen: Option<Option<String>>,
}

/// Marks a field as present whenever its key appears, even with `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    /// Returns true if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// The field diff in column order.
    #[must_use]
    pub fn changes(&self) -> Vec<FieldChange> {
        let text = |field, value: &Option<Option<String>>| {
            value.clone().map(|v| FieldChange {
                field,
                value: FieldValue::Text(v),
            })
        };

        [
            text(ProductField::Nombre, &self.nombre),
            text(ProductField::Descripcion, &self.descripcion),
            self.precio.map(|v| FieldChange {
                field: ProductField::Precio,
                value: FieldValue::Real(v),
            }),
            self.stock.map(|v| FieldChange {
                field: ProductField::Stock,
                value: FieldValue::Integer(v),
            }),
            text(ProductField::Categoria, &self.categoria),
            text(ProductField::Imagen, &self.imagen),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// The field diff, rejecting an update that touches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyPatch`] if no field is present.
    pub fn validate(&self) -> Result<Vec<FieldChange>, ProductError> {
        let changes = self.changes();
        if changes.is_empty() {
            return Err(ProductError::EmptyPatch);
        }
        Ok(changes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lapiz() -> Product {
        Product {
            id: ProductId::new(1),
            nombre: "Lapiz".to_string(),
            descripcion: Some(String::new()),
            precio: Some(0.0),
            stock: Some(0),
            categoria: Some(String::new()),
            imagen: Some(String::new()),
        }
    }

    #[test]
    fn test_validate_applies_defaults() {
        let input: NewProduct = serde_json::from_str(r#"{"nombre":"Lapiz"}"#).unwrap();
        let draft = input.validate().unwrap();
        assert_eq!(
            draft,
            ProductDraft {
                nombre: "Lapiz".to_string(),
                descripcion: String::new(),
                precio: 0.0,
                stock: 0,
                categoria: String::new(),
                imagen: String::new(),
            }
        );
    }

    #[test]
    fn test_validate_null_optional_takes_default() {
        let input: NewProduct =
            serde_json::from_str(r#"{"nombre":"Lapiz","stock":null,"precio":2.5}"#).unwrap();
        let draft = input.validate().unwrap();
        assert_eq!(draft.stock, 0);
        assert!((draft.precio - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_requires_name() {
        let missing: NewProduct = serde_json::from_str(r#"{"precio":3}"#).unwrap();
        assert_eq!(missing.validate(), Err(ProductError::MissingName));

        let empty: NewProduct = serde_json::from_str(r#"{"nombre":""}"#).unwrap();
        assert_eq!(empty.validate(), Err(ProductError::MissingName));
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"descripcion":null,"precio":12.5}"#).unwrap();
        assert_eq!(patch.nombre, None);
        assert_eq!(patch.descripcion, Some(None));
        assert_eq!(patch.precio, Some(Some(12.5)));

        let changes = patch.validate().unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field, ProductField::Descripcion);
        assert_eq!(changes[0].value, FieldValue::Text(None));
        assert_eq!(changes[1].field, ProductField::Precio);
    }

    #[test]
    fn test_patch_empty_string_is_present() {
        let patch: ProductPatch = serde_json::from_str(r#"{"categoria":""}"#).unwrap();
        assert_eq!(
            patch.changes(),
            vec![FieldChange {
                field: ProductField::Categoria,
                value: FieldValue::Text(Some(String::new())),
            }]
        );
    }

    #[test]
    fn test_patch_without_fields_is_rejected() {
        let patch: ProductPatch = serde_json::from_str(r#"{"id":4,"otro":1}"#).unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.validate(), Err(ProductError::EmptyPatch));
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ProductPatch {
            stock: Some(Some(9)),
            imagen: Some(None),
            ..ProductPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"stock": 9, "imagen": null}));
    }

    #[test]
    fn test_catalog_product_fallbacks_differ() {
        let listed = serde_json::to_value(CatalogProduct::for_listing(lapiz())).unwrap();
        assert_eq!(listed["imagen_url"], "/img/default.png");
        assert_eq!(listed["nombre"], "Lapiz");

        let detail = serde_json::to_value(CatalogProduct::for_detail(lapiz())).unwrap();
        assert!(detail["imagen_url"].is_null());
        assert_eq!(detail["id"], 1);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProductError::MissingName.to_string(),
            "El campo 'nombre' es requerido."
        );
        assert_eq!(ProductError::EmptyPatch.to_string(), "Nada para actualizar.");
    }
}
