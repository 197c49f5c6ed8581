//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod migrate;
pub mod product;
pub mod seed;
pub mod upload;

use mercado_storefront::{CatalogClient, ClientConfig};

/// Build a catalog client from `MERCADO_API_URL`.
///
/// # Errors
///
/// Returns an error if the configured URL is invalid.
pub fn client() -> Result<CatalogClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, "using catalog API");
    Ok(CatalogClient::new(&config.api_url))
}
