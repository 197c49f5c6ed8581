//! Mercado storefront library.
//!
//! Everything the catalog's browser client does, as a library: an HTTP
//! client for the catalog API, HTML rendering of the catalog grid, product
//! detail and cart, and a file-backed key-value store standing in for
//! browser local storage.
//!
//! # Modules
//!
//! - [`api`] - `CatalogClient` and the [`api::ProductSource`] port
//! - [`catalog`] - Catalog grid and product detail rendering
//! - [`cart`] - Cart resolution, rendering and simulated checkout
//! - [`storage`] - `FileStorage` implementation of `CartStorage`
//! - [`config`] - Client configuration from the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;

pub use api::{CatalogClient, ClientError, ProductSource};
pub use config::ClientConfig;
pub use error::StorefrontError;
pub use storage::FileStorage;
