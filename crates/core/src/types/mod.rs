//! Core types for Mercado.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod api;
pub mod id;
pub mod image;
pub mod price;
pub mod product;

pub use api::{CreatedBody, ErrorBody, MessageBody, UploadedFile};
pub use id::*;
pub use image::{PLACEHOLDER_IMAGE, UPLOADS_PREFIX, detail_image_url, listing_image_url, upload_url};
pub use price::{Price, PriceError};
pub use product::{
    CatalogProduct, FieldChange, FieldValue, NewProduct, Product, ProductDraft, ProductError,
    ProductField, ProductPatch,
};
