//! Catalog browsing: the product grid.

use mercado_storefront::catalog;

/// Fetch the catalog and print the rendered grid.
///
/// A failed fetch renders an empty grid and is logged.
///
/// # Errors
///
/// Returns an error if configuration is invalid or rendering fails.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let html = catalog::load_catalog(&client).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{html}");
    }
    Ok(())
}
